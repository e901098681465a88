//! Auth session: credential storage, cookies and the auth service client.

pub mod client;
pub mod cookies;
pub mod store;

use thiserror::Error;

pub use client::{AuthClient, Session, SessionInfo, User};
pub use cookies::{CookieJar, StoredCookie};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid auth URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Auth service returned HTTP {0}")]
    Status(u16),
    #[error("Credential storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid stored data: {0}")]
    Json(#[from] serde_json::Error),
}
