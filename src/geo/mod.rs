//! Coordinates and the map collaborators: reverse geocoding, driving routes
//! and place search.
//!
//! Collaborators never fail towards the caller. A provider error is logged
//! and turned into a neutral value (`"address unavailable"`, an empty route,
//! no predictions) so the screen keeps working with degraded data.

pub mod geocoding;
pub mod neighborhoods;
pub mod places;
pub mod point;
pub mod routing;

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::MapsConfig;

pub use geocoding::{Geocoder, NominatimGeocoder, ADDRESS_UNAVAILABLE};
pub use neighborhoods::{filter_neighborhoods, find_neighborhood, Neighborhood, NEIGHBORHOODS};
pub use places::{PlaceDetails, PlacePrediction, PlacesClient};
pub use point::{
    format_point_label, haversine_km, region_between, region_for_points, Coordinate, MapRegion,
    RoutePoint, DEFAULT_REGION,
};
pub use routing::{OsrmRouter, RouteProvider, RouteSummary};

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Provider returned HTTP {0}")]
    Status(u16),
    #[error("Provider response has no {0}")]
    Missing(&'static str),
}

/// Parses a provider root so that relative paths join beneath it.
pub(crate) fn provider_base(url: &str) -> Result<Url, url::ParseError> {
    if url.ends_with('/') {
        Url::parse(url)
    } else {
        Url::parse(&format!("{url}/"))
    }
}

pub(crate) fn provider_client(maps: &MapsConfig) -> Result<reqwest::Client, GeoError> {
    Ok(reqwest::Client::builder()
        .user_agent(maps.user_agent.clone())
        .timeout(Duration::from_secs(maps.timeout_seconds))
        .build()?)
}
