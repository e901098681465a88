use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::{provider_base, provider_client, Coordinate, GeoError};
use crate::config::MapsConfig;

/// Driving route between two points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub coordinates: Vec<Coordinate>,
    /// Kilometers, rounded to two decimals
    pub distance_km: f64,
    pub duration_min: u32,
}

impl RouteSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn estimated_price(&self) -> u32 {
        crate::pricing::estimate_price(self.distance_km)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Never fails; returns [`RouteSummary::empty`] when no route is found.
    async fn driving_route(&self, from: Coordinate, to: Coordinate) -> RouteSummary;
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: Vec<[f64; 2]>,
}

impl From<OsrmRoute> for RouteSummary {
    fn from(route: OsrmRoute) -> Self {
        Self {
            coordinates: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate::new(lat, lon))
                .collect(),
            distance_km: (route.distance / 10.0).round() / 100.0,
            duration_min: (route.duration / 60.0).round().max(0.0) as u32,
        }
    }
}

/// Route provider backed by an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmRouter {
    http: reqwest::Client,
    base_url: Url,
}

impl OsrmRouter {
    pub fn new(maps: &MapsConfig) -> Result<Self, GeoError> {
        Ok(Self {
            http: provider_client(maps)?,
            base_url: provider_base(&maps.osrm_url)?,
        })
    }

    pub async fn try_route(&self, from: Coordinate, to: Coordinate) -> Result<RouteSummary, GeoError> {
        let path = format!(
            "route/v1/driving/{},{};{},{}",
            from.longitude, from.latitude, to.longitude, to.latitude
        );
        let url = self.base_url.join(&path)?;
        let response = self
            .http
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: OsrmResponse = response.json().await?;
        body.routes
            .into_iter()
            .next()
            .map(RouteSummary::from)
            .ok_or(GeoError::Missing("route"))
    }
}

#[async_trait]
impl RouteProvider for OsrmRouter {
    async fn driving_route(&self, from: Coordinate, to: Coordinate) -> RouteSummary {
        match self.try_route(from, to).await {
            Ok(route) => {
                debug!(
                    distance_km = route.distance_km,
                    duration_min = route.duration_min,
                    points = route.coordinates.len(),
                    "Route calculated"
                );
                route
            }
            Err(e) => {
                warn!(error = %e, "Route calculation failed");
                RouteSummary::empty()
            }
        }
    }
}
