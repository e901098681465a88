use statig::prelude::*;
use std::fmt;

/// Seconds a freshly sent code stays valid.
pub const OTP_DURATION_SECONDS: u32 = 30;
/// Code accepted by the client until codes are issued by the server.
pub const DEFAULT_OTP_CODE: &str = "1234";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpEvent {
    /// Verification screen entered.
    Start,
    /// One second elapsed.
    Tick,
    Input(String),
    Verify,
    Resend,
    /// Verification screen left.
    Cancel,
}

/// Message shown under the code input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMessage {
    Expired,
    Incorrect,
    Verified,
    Resent,
}

impl fmt::Display for VerificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VerificationMessage::Expired => "code expired",
            VerificationMessage::Incorrect => "incorrect code",
            VerificationMessage::Verified => "code verified",
            VerificationMessage::Resent => "a new code has been sent",
        };
        f.write_str(text)
    }
}

pub struct OtpVerifier {
    expected_code: String,
    duration_seconds: u32,
    entered_code: String,
    remaining_seconds: u32,
    message: Option<VerificationMessage>,
}

impl OtpVerifier {
    pub fn new(expected_code: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            expected_code: expected_code.into(),
            duration_seconds,
            entered_code: String::new(),
            remaining_seconds: duration_seconds,
            message: None,
        }
    }

    pub fn entered_code(&self) -> &str {
        &self.entered_code
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn message(&self) -> Option<VerificationMessage> {
        self.message
    }

    fn restart(&mut self) {
        self.entered_code.clear();
        self.remaining_seconds = self.duration_seconds;
    }

    fn tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }
}

#[state_machine(
    initial = "State::idle()",
    state(derive(Debug, Clone, Copy, PartialEq, Eq))
)]
impl OtpVerifier {
    #[state]
    fn idle(&mut self, event: &OtpEvent) -> Outcome<State> {
        match event {
            OtpEvent::Start => {
                self.restart();
                self.message = None;
                tracing::debug!(seconds = self.remaining_seconds, "Verification started");
                Transition(State::counting())
            }
            _ => Handled,
        }
    }

    #[state]
    fn counting(&mut self, event: &OtpEvent) -> Outcome<State> {
        match event {
            OtpEvent::Tick => {
                self.tick();
                Handled
            }
            OtpEvent::Input(code) => {
                self.entered_code = code.clone();
                Handled
            }
            OtpEvent::Verify => {
                if self.remaining_seconds == 0 {
                    self.message = Some(VerificationMessage::Expired);
                    tracing::warn!("Verification attempted after code expiry");
                    Transition(State::expired())
                } else if self.entered_code == self.expected_code {
                    self.message = Some(VerificationMessage::Verified);
                    tracing::info!(
                        remaining_seconds = self.remaining_seconds,
                        "Code verified"
                    );
                    Transition(State::verified())
                } else {
                    self.message = Some(VerificationMessage::Incorrect);
                    tracing::debug!(
                        remaining_seconds = self.remaining_seconds,
                        "Incorrect code entered"
                    );
                    Handled
                }
            }
            OtpEvent::Resend => {
                self.restart();
                self.message = Some(VerificationMessage::Resent);
                Handled
            }
            OtpEvent::Start => {
                self.restart();
                self.message = None;
                Handled
            }
            OtpEvent::Cancel => Transition(State::idle()),
        }
    }

    #[state]
    fn expired(&mut self, event: &OtpEvent) -> Outcome<State> {
        match event {
            OtpEvent::Resend => {
                self.restart();
                self.message = Some(VerificationMessage::Resent);
                Transition(State::counting())
            }
            OtpEvent::Start => {
                self.restart();
                self.message = None;
                Transition(State::counting())
            }
            OtpEvent::Input(code) => {
                self.entered_code = code.clone();
                Handled
            }
            OtpEvent::Verify => {
                self.message = Some(VerificationMessage::Expired);
                Handled
            }
            OtpEvent::Cancel => Transition(State::idle()),
            OtpEvent::Tick => Handled,
        }
    }

    #[state]
    fn verified(&mut self, event: &OtpEvent) -> Outcome<State> {
        match event {
            OtpEvent::Cancel => Transition(State::idle()),
            _ => Handled,
        }
    }
}
