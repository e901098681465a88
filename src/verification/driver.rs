use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, Instrument};

use crate::telemetry::{create_flow_span, generate_correlation_id};

use super::otp::{OtpPhase, OtpSession, OtpSnapshot, VerifyOutcome};

const TICK: Duration = Duration::from_secs(1);

/// User input forwarded to a running verification screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpCommand {
    Enter(String),
    Verify,
    Resend,
    Cancel,
}

/// Handle on a spawned verification screen.
#[derive(Debug)]
pub struct OtpHandle {
    pub commands: mpsc::Sender<OtpCommand>,
    pub updates: watch::Receiver<OtpSnapshot>,
    pub task: JoinHandle<OtpSession>,
}

/// Spawns the countdown loop for `session` on the current runtime.
pub fn spawn_verification(session: OtpSession) -> OtpHandle {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (update_tx, update_rx) = watch::channel(session.snapshot());
    let correlation_id = generate_correlation_id();
    let span = create_flow_span("otp_verification", Some(&correlation_id));
    let task = tokio::spawn(run_verification(session, command_rx, update_tx).instrument(span));

    OtpHandle {
        commands: command_tx,
        updates: update_rx,
        task,
    }
}

/// Drives one verification screen until the code is verified or input ends.
///
/// The session ticks once per second while counting; commands are applied in
/// arrival order. Every change is published on `updates`.
pub async fn run_verification(
    mut session: OtpSession,
    mut commands: mpsc::Receiver<OtpCommand>,
    updates: watch::Sender<OtpSnapshot>,
) -> OtpSession {
    if session.phase() == OtpPhase::Idle {
        session.start();
    }
    updates.send_replace(session.snapshot());

    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick(), if session.is_ticking() => {
                let remaining = session.tick();
                if remaining == 0 {
                    debug!("Countdown finished");
                }
            }
            command = commands.recv() => match command {
                Some(OtpCommand::Enter(code)) => session.enter_code(code),
                Some(OtpCommand::Verify) => {
                    let outcome = session.verify();
                    debug!(?outcome, "Verify pressed");
                }
                Some(OtpCommand::Resend) => {
                    session.resend();
                    ticker.reset();
                }
                Some(OtpCommand::Cancel) => {
                    session.cancel();
                    updates.send_replace(session.snapshot());
                    break;
                }
                None => break,
            },
        }

        updates.send_replace(session.snapshot());
        if session.is_verified() {
            break;
        }
    }

    session
}

impl OtpHandle {
    /// Enters a code and presses verify.
    pub async fn submit_code(&self, code: impl Into<String>) -> bool {
        self.commands.send(OtpCommand::Enter(code.into())).await.is_ok()
            && self.commands.send(OtpCommand::Verify).await.is_ok()
    }

    pub fn snapshot(&self) -> OtpSnapshot {
        self.updates.borrow().clone()
    }

    /// Outcome implied by the latest snapshot, if a verify was pressed.
    pub fn last_outcome(&self) -> Option<VerifyOutcome> {
        let snapshot = self.updates.borrow();
        match snapshot.phase {
            OtpPhase::Verified => Some(VerifyOutcome::Verified),
            OtpPhase::Expired => Some(VerifyOutcome::Expired),
            _ => snapshot
                .message
                .filter(|m| *m == super::VerificationMessage::Incorrect)
                .map(|_| VerifyOutcome::Incorrect),
        }
    }
}
