use anyhow::Result;
use tracing::warn;

use super::{auth_client, Command};
use ilicoo::config;
use ilicoo::session::User;

fn print_user(user: &User) {
    println!("👤 {} <{}>", user.name, user.email);
    println!("   📞 {} {}", user.phone_dial_code, user.phone_number);
    println!("   🌍 {} · {}", user.country, user.gender);
}

pub struct ShowSessionCommand;

impl Command for ShowSessionCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let auth = auth_client(config)?;

        match auth.get_session().await {
            Ok(Some(session)) => {
                print_user(&session.user);
                println!("   ⏳ Session expires {}", session.session.expires_at);
            }
            Ok(None) => println!("🔒 Not signed in. Run 'ilicoo sign-in' first."),
            Err(e) => {
                warn!(error = %e, "Session lookup failed, using cached session");
                match auth.cached_session().await? {
                    Some(session) => {
                        println!("📴 Auth service unreachable ({e}); last known session:");
                        print_user(&session.user);
                    }
                    None => return Err(e.into()),
                }
            }
        }
        Ok(())
    }
}

pub struct SignOutCommand;

impl Command for SignOutCommand {
    async fn execute(&self) -> Result<()> {
        let config = config()?;
        let auth = auth_client(config)?;

        match auth.sign_out().await {
            Ok(()) => println!("👋 Signed out"),
            Err(e) => {
                println!("👋 Local credentials cleared; the server did not confirm ({e})");
            }
        }
        Ok(())
    }
}
