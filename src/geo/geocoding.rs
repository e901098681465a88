use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use tracing::{debug, warn};
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::{provider_base, provider_client, Coordinate, GeoError};
use crate::config::MapsConfig;

/// Address shown when reverse geocoding fails.
pub const ADDRESS_UNAVAILABLE: &str = "address unavailable";

/// Turns a coordinate into a human-readable address.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Never fails; returns [`ADDRESS_UNAVAILABLE`] when the lookup does.
    async fn reverse(&self, at: Coordinate) -> String;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Reverse geocoder backed by Nominatim, rate limited per its usage policy.
#[derive(Debug)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: Url,
    limiter: DefaultDirectRateLimiter,
}

impl NominatimGeocoder {
    pub fn new(maps: &MapsConfig) -> Result<Self, GeoError> {
        let per_second = NonZeroU32::new(maps.geocoding_requests_per_second).unwrap_or(NonZeroU32::MIN);
        Ok(Self {
            http: provider_client(maps)?,
            base_url: provider_base(&maps.nominatim_url)?,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    pub async fn try_reverse(&self, at: Coordinate) -> Result<String, GeoError> {
        self.limiter.until_ready().await;

        let url = self.base_url.join("reverse")?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: ReverseResponse = response.json().await?;
        body.display_name.ok_or(GeoError::Missing("display_name"))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, at: Coordinate) -> String {
        match self.try_reverse(at).await {
            Ok(address) => {
                debug!(lat = at.latitude, lon = at.longitude, "Reverse geocoded");
                address
            }
            Err(e) => {
                warn!(lat = at.latitude, lon = at.longitude, error = %e, "Reverse geocoding failed");
                ADDRESS_UNAVAILABLE.to_string()
            }
        }
    }
}
