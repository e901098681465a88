use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::info;

use crate::config::VerificationConfig;
use crate::data::{default_country, CountryCode};
use crate::validation::{self, FieldResult};
use crate::verification::{OtpSession, VerifyOutcome};
use crate::wizard::{StepForm, StepWizard};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8,15}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignUpMethod {
    Google,
    Apple,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpStep {
    Method,
    Form,
    Otp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignUpField {
    Email,
    Name,
    PhoneDialCode,
    PhoneNumber,
    Gender,
}

/// Account details collected before phone verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    pub email: String,
    pub name: String,
    pub phone_dial_code: String,
    pub phone_number: String,
    pub gender: Option<Gender>,
}

impl Default for SignUpData {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            phone_dial_code: default_country().dial.to_string(),
            phone_number: String::new(),
            gender: Some(Gender::Male),
        }
    }
}

impl StepForm for SignUpData {
    type Field = SignUpField;

    fn fields_by_step() -> Vec<Vec<SignUpField>> {
        vec![vec![
            SignUpField::Email,
            SignUpField::Name,
            SignUpField::PhoneDialCode,
            SignUpField::PhoneNumber,
            SignUpField::Gender,
        ]]
    }

    fn validate_field(&self, field: SignUpField) -> FieldResult {
        match field {
            SignUpField::Email => validation::email(&self.email, "Invalid email"),
            SignUpField::Name => validation::min_chars(&self.name, 2, "Full name is required")
                .and_then(|_| {
                    validation::max_chars(
                        &self.name,
                        50,
                        "Full name must not exceed 50 characters",
                    )
                }),
            SignUpField::PhoneDialCode => {
                validation::min_chars(&self.phone_dial_code, 1, "Country code is required")
                    .and_then(|_| {
                        validation::max_chars(&self.phone_dial_code, 5, "Country code is invalid")
                    })
            }
            SignUpField::PhoneNumber => validation::matches(
                &self.phone_number,
                &PHONE_PATTERN,
                "Phone number must contain 8 to 15 digits",
            ),
            SignUpField::Gender => validation::present(self.gender.as_ref(), "Gender is required"),
        }
    }
}

/// Address filled in for social sign-up until the provider returns one.
pub fn placeholder_email() -> String {
    let n: u8 = rand::rng().random_range(1..=20);
    format!("test{n}@test.com")
}

/// Sign-up: choose a method, fill the form, verify the phone.
#[derive(Debug)]
pub struct SignUpFlow {
    step: SignUpStep,
    method: Option<SignUpMethod>,
    country: &'static CountryCode,
    form: StepWizard<SignUpData>,
    submitted: Option<SignUpData>,
    otp: OtpSession,
}

impl SignUpFlow {
    pub fn new(verification: &VerificationConfig) -> Self {
        Self {
            step: SignUpStep::Method,
            method: None,
            country: default_country(),
            form: StepWizard::new(SignUpData::default()),
            submitted: None,
            otp: OtpSession::from_config(verification),
        }
    }

    pub fn step(&self) -> SignUpStep {
        self.step
    }

    pub fn method(&self) -> Option<SignUpMethod> {
        self.method
    }

    pub fn country(&self) -> &'static CountryCode {
        self.country
    }

    pub fn form(&self) -> &StepWizard<SignUpData> {
        &self.form
    }

    pub fn data_mut(&mut self) -> &mut SignUpData {
        self.form.form_mut()
    }

    pub fn submitted(&self) -> Option<&SignUpData> {
        self.submitted.as_ref()
    }

    pub fn otp(&self) -> &OtpSession {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut OtpSession {
        &mut self.otp
    }

    /// Social methods get a placeholder email; email sign-up leaves it blank.
    pub fn choose_method(&mut self, method: SignUpMethod) {
        self.method = Some(method);
        if method != SignUpMethod::Email {
            self.form.form_mut().email = placeholder_email();
        }
        self.step = SignUpStep::Form;
    }

    /// Picks a country and revalidates the dial code.
    pub fn select_country(&mut self, country: &'static CountryCode) {
        self.country = country;
        self.form.form_mut().phone_dial_code = country.dial.to_string();
        self.form.revalidate_field(SignUpField::PhoneDialCode);
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.form.form_mut().gender = Some(gender);
        self.form.revalidate_field(SignUpField::Gender);
    }

    /// Validates the form; on success keeps the data and starts verification.
    pub fn submit(&mut self) -> bool {
        let Some(data) = self.form.submit().cloned() else {
            return false;
        };
        info!(method = ?self.method, country = self.country.code, "Sign-up form submitted");
        self.submitted = Some(data);
        self.step = SignUpStep::Otp;
        self.otp.start();
        true
    }

    pub fn verify(&mut self, code: impl Into<String>) -> VerifyOutcome {
        self.otp.enter_code(code);
        self.otp.verify()
    }

    pub fn resend(&mut self) {
        self.otp.resend();
    }

    /// One step back; `false` on the method step, where the caller leaves.
    pub fn back(&mut self) -> bool {
        match self.step {
            SignUpStep::Method => false,
            SignUpStep::Form => {
                self.step = SignUpStep::Method;
                true
            }
            SignUpStep::Otp => {
                self.otp.cancel();
                self.step = SignUpStep::Form;
                true
            }
        }
    }
}
