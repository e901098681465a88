use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    /// `None` for session cookies
    pub expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_none_or(|expires| expires > now)
    }
}

/// Cookies received from the auth service, keyed by name.
///
/// Serialized as a JSON object so it can be kept in a credential store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    cookies: BTreeMap<String, StoredCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StoredCookie> {
        self.cookies.get(name)
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// Applies one `Set-Cookie` header. `Max-Age` wins over `Expires`; an
    /// already expired cookie is removed. Returns `false` for a malformed
    /// header.
    pub fn apply_set_cookie(&mut self, header: &str, now: DateTime<Utc>) -> bool {
        let mut parts = header.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let mut expires = None;
        let mut max_age = None;
        for attribute in parts {
            let (key, val) = attribute.split_once('=').unwrap_or((attribute, ""));
            match key.trim().to_ascii_lowercase().as_str() {
                "max-age" => max_age = val.trim().parse::<i64>().ok(),
                "expires" => expires = parse_expires(val.trim()),
                _ => {}
            }
        }
        if let Some(seconds) = max_age {
            // out of range ages keep the cookie without an expiry
            expires = Duration::try_seconds(seconds).and_then(|age| now.checked_add_signed(age));
        }

        let cookie = StoredCookie {
            value: value.trim().to_string(),
            expires,
        };
        if cookie.is_live(now) {
            debug!(name, "Cookie stored");
            self.cookies.insert(name.to_string(), cookie);
        } else {
            debug!(name, "Cookie expired by server");
            self.cookies.remove(name);
        }
        true
    }

    /// `Cookie` header value made of the cookies still valid at `now`.
    pub fn header(&self, now: DateTime<Utc>) -> String {
        self.cookies
            .iter()
            .filter(|(_, c)| c.is_live(now))
            .map(|(name, c)| format!("{name}={}", c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// RFC 2822 dates, falling back to the dashed Netscape form
/// (`Wed, 01-Jan-2020 00:00:00 GMT`).
fn parse_expires(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .map(|d| d.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%a, %d-%b-%Y %H:%M:%S GMT").map(|d| d.and_utc())
        })
        .ok()
}
