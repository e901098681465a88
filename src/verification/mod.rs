//! One-time passcode verification: a countdown and a code check.

pub mod driver;
pub mod machine;
pub mod otp;

pub use driver::{run_verification, spawn_verification, OtpCommand, OtpHandle};
pub use machine::{OtpEvent, VerificationMessage, DEFAULT_OTP_CODE, OTP_DURATION_SECONDS};
pub use otp::{OtpPhase, OtpSession, OtpSnapshot, VerifyOutcome};
