//! Sign-in and sign-up flows.

pub mod sign_in;
pub mod sign_up;

use serde::{Deserialize, Serialize};

pub use sign_in::{PhoneSignIn, PhoneStep, MIN_PHONE_CHARS};
pub use sign_up::{Gender, SignUpData, SignUpField, SignUpFlow, SignUpMethod, SignUpStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInMethod {
    Google,
    Apple,
    Email,
    Phone,
}

impl SignInMethod {
    pub fn title(self) -> &'static str {
        match self {
            SignInMethod::Google => "Google",
            SignInMethod::Apple => "Apple",
            SignInMethod::Email => "Email",
            SignInMethod::Phone => "Téléphone",
        }
    }

    pub fn is_social(self) -> bool {
        matches!(self, SignInMethod::Google | SignInMethod::Apple)
    }
}
