//! Backend REST API.

pub mod client;
pub mod services;

use thiserror::Error;

pub use client::ApiClient;
pub use services::{get_route_passengers, get_vehicles, ROUTE_PASSENGERS_KEY, VEHICLES_KEY};

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer; the message comes from the body's `error` field when
    /// there is one.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Session unavailable: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub(crate) fn from_error_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| format!("API Error: {status}"));
        ApiError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
