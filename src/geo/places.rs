use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{provider_base, provider_client, Coordinate, GeoError};
use crate::config::MapsConfig;

const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePrediction {
    pub place_id: String,
    pub description: String,
    pub structured_formatting: StructuredFormatting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: String,
    pub formatted_address: String,
    pub geometry: PlaceGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl PlaceDetails {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.geometry.location.lat, self.geometry.location.lng)
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

/// Place autocomplete restricted to one country.
///
/// [`PlacesClient::search`] is debounced: each call supersedes any search
/// still waiting out the debounce delay, and superseded searches return
/// `None` without touching the network.
#[derive(Debug)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    country_code: String,
    language: String,
    debounce: Duration,
    generation: AtomicU64,
}

impl PlacesClient {
    pub fn new(maps: &MapsConfig) -> Result<Self, GeoError> {
        Ok(Self {
            http: provider_client(maps)?,
            base_url: provider_base(&maps.places_url)?,
            api_key: maps.google_maps_api_key.clone().unwrap_or_default(),
            country_code: maps.country_code.clone(),
            language: maps.language.clone(),
            debounce: Duration::from_millis(maps.search_debounce_ms),
            generation: AtomicU64::new(0),
        })
    }

    /// Debounced autocomplete. `None` means a newer search replaced this one.
    pub async fn search(&self, input: &str) -> Option<Vec<PlacePrediction>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if input.trim().chars().count() < MIN_QUERY_CHARS {
            return Some(Vec::new());
        }

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(input, "Place search superseded");
            return None;
        }

        Some(self.autocomplete(input).await)
    }

    /// Cancels any pending debounced search.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Immediate autocomplete; empty on short input or any failure.
    pub async fn autocomplete(&self, input: &str) -> Vec<PlacePrediction> {
        if input.trim().chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        match self.try_autocomplete(input).await {
            Ok(predictions) => predictions,
            Err(e) => {
                warn!(error = %e, "Place autocomplete failed");
                Vec::new()
            }
        }
    }

    async fn try_autocomplete(&self, input: &str) -> Result<Vec<PlacePrediction>, GeoError> {
        let url = self.base_url.join("autocomplete/json")?;
        let components = format!("country:{}", self.country_code);
        let response = self
            .http
            .get(url)
            .query(&[
                ("input", input),
                ("key", self.api_key.as_str()),
                ("components", components.as_str()),
                ("language", self.language.as_str()),
                ("types", "geocode|establishment"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: AutocompleteResponse = response.json().await?;
        if body.status != "OK" {
            debug!(status = %body.status, "Autocomplete returned no results");
            return Ok(Vec::new());
        }
        Ok(body.predictions)
    }

    /// Name, address and location of a place; `None` on any failure.
    pub async fn details(&self, place_id: &str) -> Option<PlaceDetails> {
        match self.try_details(place_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(place_id, error = %e, "Place details failed");
                None
            }
        }
    }

    async fn try_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, GeoError> {
        let url = self.base_url.join("details/json")?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("place_id", place_id),
                ("key", self.api_key.as_str()),
                ("fields", "name,formatted_address,geometry"),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: DetailsResponse = response.json().await?;
        Ok(body.result.filter(|_| body.status == "OK"))
    }
}
