use serde::{Deserialize, Serialize};

use crate::geo::{haversine_km, Coordinate};

/// A route published by another driver, shown on the search map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherDriverRoute {
    pub id: String,
    pub driver_name: String,
    pub driver_rating: f32,
    pub from: String,
    pub to: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub drop_lat: f64,
    pub drop_lng: f64,
    pub price: String,
    pub available_seats: u8,
    pub departure_at: String,
    pub color: String,
    #[serde(default)]
    pub route_coordinates: Vec<Coordinate>,
}

impl OtherDriverRoute {
    pub fn pickup(&self) -> Coordinate {
        Coordinate::new(self.pickup_lat, self.pickup_lng)
    }

    pub fn drop_off(&self) -> Coordinate {
        Coordinate::new(self.drop_lat, self.drop_lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyDriver<'a> {
    pub route: &'a OtherDriverRoute,
    pub distance_km: f64,
}

/// Routes picking up within `radius_km` of `near` with at least `seats` free,
/// closest first.
pub fn nearby_drivers(
    routes: &[OtherDriverRoute],
    near: Coordinate,
    radius_km: f64,
    seats: u8,
) -> Vec<NearbyDriver<'_>> {
    let mut found: Vec<NearbyDriver<'_>> = routes
        .iter()
        .filter(|r| r.available_seats >= seats)
        .map(|route| NearbyDriver {
            route,
            distance_km: haversine_km(near, route.pickup()),
        })
        .filter(|d| d.distance_km <= radius_km)
        .collect();
    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found
}
