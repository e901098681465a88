use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::{CookieJar, CredentialStore, SessionError};
use crate::config::AuthConfig;

/// Signed-in user, including the fields added at sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
    pub phone_dial_code: String,
    pub phone_number: String,
    pub country: String,
    pub gender: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session: SessionInfo,
    pub user: User,
}

/// Client of the auth service. Cookies it receives are persisted in the
/// credential store and attached to later requests.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    cookie_key: String,
    session_key: String,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.base_url.as_str())
            .field("cookie_key", &self.cookie_key)
            .finish()
    }
}

impl AuthClient {
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self, SessionError> {
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            base_url: Url::parse(&base)?,
            store,
            cookie_key: format!("{}_cookie", config.storage_prefix),
            session_key: format!("{}_session_data", config.storage_prefix),
        })
    }

    pub fn cookie_key(&self) -> &str {
        &self.cookie_key
    }

    pub async fn cookie_jar(&self) -> Result<CookieJar, SessionError> {
        match self.store.get_item(&self.cookie_key).await? {
            Some(text) => match CookieJar::from_json(&text) {
                Ok(jar) => Ok(jar),
                Err(e) => {
                    warn!(error = %e, "Stored cookies are unreadable, starting over");
                    Ok(CookieJar::new())
                }
            },
            None => Ok(CookieJar::new()),
        }
    }

    /// `Cookie` header for requests to the backend; empty when signed out.
    pub async fn get_cookie(&self) -> Result<String, SessionError> {
        Ok(self.cookie_jar().await?.header(Utc::now()))
    }

    async fn store_cookies(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        let mut set_cookies = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .peekable();
        if set_cookies.peek().is_none() {
            return Ok(());
        }

        let mut jar = self.cookie_jar().await?;
        let now = Utc::now();
        for header in set_cookies {
            jar.apply_set_cookie(header, now);
        }
        self.store.set_item(&self.cookie_key, &jar.to_json()?).await
    }

    /// Current session, `None` when signed out.
    pub async fn get_session(&self) -> Result<Option<Session>, SessionError> {
        let cookie = self.get_cookie().await?;
        if cookie.is_empty() {
            debug!("No session cookie stored");
            return Ok(None);
        }

        let url = self.base_url.join("api/auth/get-session")?;
        let response = self.http.get(url).header(COOKIE, cookie).send().await?;
        self.store_cookies(response.headers()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        let session: Option<Session> = response.json().await?;
        match &session {
            Some(s) => {
                debug!(user_id = %s.user.id, expires_at = %s.session.expires_at, "Session loaded");
                self.store
                    .set_item(&self.session_key, &serde_json::to_string(s)?)
                    .await?;
            }
            None => {
                self.store.delete_item(&self.session_key).await?;
            }
        }
        Ok(session)
    }

    /// Session saved by the last successful lookup, for offline starts.
    pub async fn cached_session(&self) -> Result<Option<Session>, SessionError> {
        match self.store.get_item(&self.session_key).await? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn get_user(&self) -> Result<Option<User>, SessionError> {
        Ok(self.get_session().await?.map(|s| s.user))
    }

    /// Ends the session server side, then forgets local credentials even if
    /// the server could not be reached.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let cookie = self.get_cookie().await?;
        let url = self.base_url.join("api/auth/sign-out")?;
        let result = self
            .http
            .post(url)
            .header(COOKIE, cookie)
            .json(&serde_json::json!({}))
            .send()
            .await;

        self.store.delete_item(&self.cookie_key).await?;
        self.store.delete_item(&self.session_key).await?;

        let response = result?;
        if !response.status().is_success() {
            return Err(SessionError::Status(response.status().as_u16()));
        }
        info!("Signed out");
        Ok(())
    }
}
