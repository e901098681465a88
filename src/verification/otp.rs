use statig::prelude::*;
use std::fmt;

use super::machine::{OtpEvent, OtpVerifier, State, VerificationMessage};
use crate::config::VerificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPhase {
    Idle,
    Counting,
    Expired,
    Verified,
}

/// Result of pressing "verify".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    Incorrect,
    Expired,
    NotStarted,
}

/// Point-in-time view of a session, published to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSnapshot {
    pub phase: OtpPhase,
    pub remaining_seconds: u32,
    pub entered_code: String,
    pub message: Option<VerificationMessage>,
}

/// One verification screen: countdown plus code check.
pub struct OtpSession {
    machine: StateMachine<OtpVerifier>,
}

impl OtpSession {
    pub fn new(expected_code: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            machine: OtpVerifier::new(expected_code, duration_seconds).state_machine(),
        }
    }

    pub fn from_config(config: &VerificationConfig) -> Self {
        Self::new(config.expected_code.clone(), config.duration_seconds)
    }

    pub fn phase(&self) -> OtpPhase {
        match self.machine.state() {
            State::Idle { .. } => OtpPhase::Idle,
            State::Counting { .. } => OtpPhase::Counting,
            State::Expired { .. } => OtpPhase::Expired,
            State::Verified { .. } => OtpPhase::Verified,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.machine.inner().remaining_seconds()
    }

    pub fn entered_code(&self) -> &str {
        self.machine.inner().entered_code()
    }

    pub fn message(&self) -> Option<VerificationMessage> {
        self.machine.inner().message()
    }

    /// True while the countdown still has ticks to deliver.
    pub fn is_ticking(&self) -> bool {
        self.phase() == OtpPhase::Counting && self.remaining_seconds() > 0
    }

    pub fn is_verified(&self) -> bool {
        self.phase() == OtpPhase::Verified
    }

    /// Resets the countdown and clears the code.
    pub fn start(&mut self) {
        self.machine.handle(&OtpEvent::Start);
    }

    /// Advances the countdown by one second, returning the seconds left.
    pub fn tick(&mut self) -> u32 {
        self.machine.handle(&OtpEvent::Tick);
        self.remaining_seconds()
    }

    pub fn enter_code(&mut self, code: impl Into<String>) {
        self.machine.handle(&OtpEvent::Input(code.into()));
    }

    pub fn verify(&mut self) -> VerifyOutcome {
        if self.phase() == OtpPhase::Idle {
            return VerifyOutcome::NotStarted;
        }
        self.machine.handle(&OtpEvent::Verify);
        match self.phase() {
            OtpPhase::Verified => VerifyOutcome::Verified,
            OtpPhase::Expired => VerifyOutcome::Expired,
            _ => VerifyOutcome::Incorrect,
        }
    }

    pub fn resend(&mut self) {
        self.machine.handle(&OtpEvent::Resend);
    }

    pub fn cancel(&mut self) {
        self.machine.handle(&OtpEvent::Cancel);
    }

    pub fn snapshot(&self) -> OtpSnapshot {
        OtpSnapshot {
            phase: self.phase(),
            remaining_seconds: self.remaining_seconds(),
            entered_code: self.entered_code().to_string(),
            message: self.message(),
        }
    }
}

impl Default for OtpSession {
    fn default() -> Self {
        Self::from_config(&VerificationConfig::default())
    }
}

impl fmt::Debug for OtpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpSession")
            .field("phase", &self.phase())
            .field("remaining_seconds", &self.remaining_seconds())
            .field("message", &self.message())
            .finish()
    }
}
