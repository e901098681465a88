use tracing::{debug, info};

use crate::config::VerificationConfig;
use crate::data::{default_country, CountryCode};
use crate::validation::{self, FieldError};
use crate::verification::{OtpSession, VerifyOutcome};

/// Shortest phone number accepted before sending a code.
pub const MIN_PHONE_CHARS: usize = 8;

const INVALID_NUMBER: &str = "invalid number: enter at least 8 digits";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneStep {
    Input,
    Otp,
}

/// Phone sign-in: number entry, then code verification.
#[derive(Debug)]
pub struct PhoneSignIn {
    country: &'static CountryCode,
    phone: String,
    step: PhoneStep,
    otp: OtpSession,
    error: Option<FieldError>,
}

impl PhoneSignIn {
    pub fn new(verification: &VerificationConfig) -> Self {
        Self {
            country: default_country(),
            phone: String::new(),
            step: PhoneStep::Input,
            otp: OtpSession::from_config(verification),
            error: None,
        }
    }

    pub fn country(&self) -> &'static CountryCode {
        self.country
    }

    pub fn select_country(&mut self, country: &'static CountryCode) {
        self.country = country;
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    /// Number as sent to the auth service, e.g. `+22370001111`.
    pub fn full_number(&self) -> String {
        format!("{}{}", self.country.dial, self.phone.trim())
    }

    pub fn step(&self) -> PhoneStep {
        self.step
    }

    pub fn otp(&self) -> &OtpSession {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut OtpSession {
        &mut self.otp
    }

    /// Validation error of the number, or the verification message.
    pub fn message(&self) -> Option<String> {
        match &self.error {
            Some(error) => Some(error.to_string()),
            None => self.otp.message().map(|m| m.to_string()),
        }
    }

    /// Moves to code entry and starts the countdown.
    pub fn start_otp(&mut self) -> Result<(), FieldError> {
        if let Err(error) = validation::min_chars(self.phone.trim(), MIN_PHONE_CHARS, INVALID_NUMBER) {
            debug!(chars = self.phone.trim().chars().count(), "Phone number too short");
            self.error = Some(error.clone());
            return Err(error);
        }
        self.error = None;
        self.step = PhoneStep::Otp;
        self.otp.start();
        info!(country = self.country.code, "Verification code requested");
        Ok(())
    }

    pub fn verify(&mut self, code: impl Into<String>) -> VerifyOutcome {
        self.otp.enter_code(code);
        self.otp.verify()
    }

    pub fn resend(&mut self) {
        self.otp.resend();
    }

    /// Back to number entry; the running countdown is dropped.
    pub fn change_number(&mut self) {
        self.otp.cancel();
        self.step = PhoneStep::Input;
    }

    /// Hands the started session to an async driver.
    pub fn into_otp_session(self) -> OtpSession {
        self.otp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::find_country;
    use crate::verification::OtpPhase;

    fn flow() -> PhoneSignIn {
        PhoneSignIn::new(&VerificationConfig::default())
    }

    #[test]
    fn short_numbers_stay_on_input() {
        let mut sign_in = flow();
        sign_in.set_phone(" 7000111 ");
        assert!(sign_in.start_otp().is_err());
        assert_eq!(sign_in.step(), PhoneStep::Input);
        assert_eq!(sign_in.message().as_deref(), Some(INVALID_NUMBER));
        assert_eq!(sign_in.otp().phase(), OtpPhase::Idle);
    }

    #[test]
    fn valid_number_starts_the_countdown() {
        let mut sign_in = flow();
        sign_in.select_country(find_country("ML").unwrap());
        sign_in.set_phone("70001111");
        sign_in.start_otp().unwrap();

        assert_eq!(sign_in.step(), PhoneStep::Otp);
        assert_eq!(sign_in.otp().remaining_seconds(), 30);
        assert_eq!(sign_in.full_number(), "+22370001111");
        assert_eq!(sign_in.message(), None);

        assert_eq!(sign_in.verify("0000"), VerifyOutcome::Incorrect);
        assert_eq!(sign_in.message().as_deref(), Some("incorrect code"));
        assert_eq!(sign_in.verify("1234"), VerifyOutcome::Verified);
    }

    #[test]
    fn changing_number_goes_back() {
        let mut sign_in = flow();
        sign_in.set_phone("70001111");
        sign_in.start_otp().unwrap();
        sign_in.change_number();
        assert_eq!(sign_in.step(), PhoneStep::Input);
        assert_eq!(sign_in.otp().phase(), OtpPhase::Idle);
    }

    #[test]
    fn expired_code_needs_a_resend() {
        let mut sign_in = flow();
        sign_in.set_phone("70001111");
        sign_in.start_otp().unwrap();
        for _ in 0..30 {
            sign_in.otp_mut().tick();
        }
        assert_eq!(sign_in.verify("1234"), VerifyOutcome::Expired);
        sign_in.resend();
        assert_eq!(sign_in.message().as_deref(), Some("a new code has been sent"));
        assert_eq!(sign_in.verify("1234"), VerifyOutcome::Verified);
    }
}
