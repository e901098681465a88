use moka::future::Cache;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::ApiError;
use crate::config::ApiConfig;
use crate::session::AuthClient;

/// JSON client of the backend REST API.
///
/// Every request carries the session cookie. Reads made through
/// [`ApiClient::query`] are cached per key until the TTL runs out or the key
/// is invalidated.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Option<Arc<AuthClient>>,
    cache: Cache<String, serde_json::Value>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.auth.is_some())
            .field("cached_queries", &self.cache.entry_count())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, auth: Option<Arc<AuthClient>>) -> Result<Self, ApiError> {
        let cache = Cache::builder()
            .max_capacity(config.query_cache_capacity)
            .time_to_live(Duration::from_secs(config.query_cache_ttl_seconds))
            .build();

        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()?,
            base_url: Url::parse(&config.resolved_base_url())?,
            auth,
            cache,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a request to `endpoint` (relative to the base URL) and decodes
    /// the JSON answer.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        let cookie = match &self.auth {
            Some(auth) => auth.get_cookie().await?,
            None => String::new(),
        };

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, cookie);
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, endpoint, "API request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = ApiError::from_error_body(status.as_u16(), &text);
            warn!(%method, endpoint, status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, None).await
    }

    /// Cached GET. Errors are never cached.
    pub async fn query<T>(&self, key: &str, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.cache.get(key).await {
            debug!(key, "Query cache hit");
            match serde_json::from_value(cached) {
                Ok(value) => return Ok(value),
                Err(e) => warn!(key, error = %e, "Cached query has another shape, refetching"),
            }
        }

        let value: T = self.get(endpoint).await?;
        self.cache
            .insert(key.to_string(), serde_json::to_value(&value)?)
            .await;
        Ok(value)
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
        debug!(key, "Query invalidated");
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        info!("Query cache cleared");
    }
}
