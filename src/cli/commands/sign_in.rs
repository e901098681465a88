use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use super::Command;
use ilicoo::auth::PhoneSignIn;
use ilicoo::config;
use ilicoo::data::find_country;
use ilicoo::device::{NotificationManager, UnsupportedPushPlatform};
use ilicoo::verification::{spawn_verification, OtpCommand, OtpPhase, OtpSnapshot};

pub struct SignInCommand {
    pub phone: Option<String>,
    pub country: String,
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::Write::flush(&mut std::io::stdout())?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}

fn report(snapshot: &OtpSnapshot, last_phase: &mut OtpPhase) {
    if snapshot.phase != *last_phase {
        match snapshot.phase {
            OtpPhase::Expired => println!("⌛ Code expired. Type 'resend' for a new one."),
            OtpPhase::Counting if *last_phase == OtpPhase::Expired => {
                println!("⏱️  {} seconds left", snapshot.remaining_seconds)
            }
            _ => {}
        }
        *last_phase = snapshot.phase;
    }
}

impl Command for SignInCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let country = find_country(&self.country)
            .ok_or_else(|| anyhow!("Unknown country code '{}'", self.country))?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let mut sign_in = PhoneSignIn::new(&config.verification);
        sign_in.select_country(country);

        let phone = match &self.phone {
            Some(phone) => phone.clone(),
            None => prompt(&mut lines, &format!("📱 Phone number ({}) ", country.dial))
                .await?
                .context("No phone number entered")?,
        };
        sign_in.set_phone(phone);
        if let Err(error) = sign_in.start_otp() {
            bail!("{error}");
        }

        let number = sign_in.full_number();
        println!("✉️  Code sent to {number}");
        println!(
            "⏱️  {} seconds to enter it. Type the code, 'resend' or 'quit'.",
            sign_in.otp().remaining_seconds()
        );

        let mut handle = spawn_verification(sign_in.into_otp_session());
        let mut last_phase = handle.snapshot().phase;
        let mut last_message = None;

        loop {
            tokio::select! {
                changed = handle.updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = handle.updates.borrow_and_update().clone();
                    report(&snapshot, &mut last_phase);
                    if snapshot.message != last_message {
                        if let Some(message) = snapshot.message {
                            println!("   {message}");
                        }
                        last_message = snapshot.message;
                    }
                    if snapshot.phase == OtpPhase::Verified {
                        break;
                    }
                }
                line = lines.next_line() => match line? {
                    None => {
                        handle.commands.send(OtpCommand::Cancel).await.ok();
                        break;
                    }
                    Some(line) => match line.trim() {
                        "" => {}
                        "quit" | "q" => {
                            handle.commands.send(OtpCommand::Cancel).await.ok();
                            break;
                        }
                        "resend" => {
                            // Clear so the same "sent" message prints again
                            last_message = None;
                            handle.commands.send(OtpCommand::Resend).await.ok();
                        }
                        code => {
                            last_message = None;
                            handle.submit_code(code).await;
                        }
                    },
                },
            }
        }

        let session = handle.task.await.context("Verification task failed")?;
        if !session.is_verified() {
            bail!("Sign-in cancelled");
        }
        info!(country = country.code, "Phone number verified");
        println!("✅ {number} verified");

        let notifications = NotificationManager::new(
            Arc::new(UnsupportedPushPlatform),
            config.api.platform,
            &config.notifications,
        );
        match notifications.register_for_push_notifications().await {
            Some(token) => println!("🔔 Push notifications registered ({token})"),
            None => println!("🔕 Push notifications unavailable on this host"),
        }
        Ok(())
    }
}
