//! Static tables bundled with the client.
//!
//! Trip tables stand in for backend endpoints that do not exist yet. They are
//! embedded as JSON and parsed on demand.

mod countries;

pub use countries::{default_country, filter_countries, find_country, CountryCode, COUNTRIES};

use crate::trips::{OtherDriverRoute, PublishedTrip, RecentTrip, Vehicle};

const RECENT_TRIPS: &str = include_str!("../../data/recent_trips.json");
const PUBLISHED_TRIPS: &str = include_str!("../../data/published_trips.json");
const OTHER_DRIVERS: &str = include_str!("../../data/other_drivers.json");

pub fn recent_trips() -> Result<Vec<RecentTrip>, serde_json::Error> {
    serde_json::from_str(RECENT_TRIPS)
}

pub fn published_trips() -> Result<Vec<PublishedTrip>, serde_json::Error> {
    serde_json::from_str(PUBLISHED_TRIPS)
}

pub fn other_driver_routes() -> Result<Vec<OtherDriverRoute>, serde_json::Error> {
    serde_json::from_str(OTHER_DRIVERS)
}

/// Vehicles shown before the vehicle endpoint answers.
pub fn sample_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: 1,
            name: "Toyota Corolla".to_string(),
            is_default: true,
            color: "noir".to_string(),
            registration: "212121".to_string(),
            maximum_passenger: 4,
        },
        Vehicle {
            id: 2,
            name: "Toyota Camry".to_string(),
            is_default: false,
            color: "noir".to_string(),
            registration: "212121".to_string(),
            maximum_passenger: 4,
        },
    ]
}
