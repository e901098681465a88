//! Field validators.
//!
//! Every validator is a plain function returning a [`FieldResult`]. Forms
//! chain them per field with `and_then`, so the first failing rule decides the
//! message shown under the field.

use regex::Regex;
use std::sync::LazyLock;

/// A user-facing validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type FieldResult = Result<(), FieldError>;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Fails when the value is empty after trimming.
pub fn required(value: &str, message: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(FieldError::new(message));
    }
    Ok(())
}

/// Fails when the value is `None`.
pub fn present<T>(value: Option<&T>, message: &str) -> FieldResult {
    match value {
        Some(_) => Ok(()),
        None => Err(FieldError::new(message)),
    }
}

pub fn min_chars(value: &str, min: usize, message: &str) -> FieldResult {
    if value.chars().count() < min {
        return Err(FieldError::new(message));
    }
    Ok(())
}

pub fn max_chars(value: &str, max: usize, message: &str) -> FieldResult {
    if value.chars().count() > max {
        return Err(FieldError::new(message));
    }
    Ok(())
}

pub fn matches(value: &str, pattern: &Regex, message: &str) -> FieldResult {
    if !pattern.is_match(value) {
        return Err(FieldError::new(message));
    }
    Ok(())
}

pub fn email(value: &str, message: &str) -> FieldResult {
    matches(value.trim(), &EMAIL_PATTERN, message)
}

/// Parses the value as an integer and checks it lies in `min..=max`.
pub fn int_in_range(value: &str, min: i64, max: i64, message: &str) -> FieldResult {
    match value.trim().parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(()),
        _ => Err(FieldError::new(message)),
    }
}
