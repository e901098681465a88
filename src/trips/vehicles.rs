use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TripError;

/// A vehicle registered by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u32,
    pub name: String,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub color: String,
    #[serde(rename = "NM")]
    pub registration: String,
    pub maximum_passenger: u8,
}

impl Vehicle {
    pub fn role_label(&self) -> &'static str {
        if self.is_default {
            "Véhicule par défaut"
        } else {
            "Véhicule secondaire"
        }
    }
}

/// Flips the default flag of one vehicle.
///
/// Making a vehicle the default clears the flag everywhere else; removing it
/// leaves the driver without a default vehicle.
pub fn toggle_default(vehicles: &mut [Vehicle], vehicle_id: u32) -> Result<bool, TripError> {
    let next_default = !vehicles
        .iter()
        .find(|v| v.id == vehicle_id)
        .ok_or(TripError::VehicleNotFound(vehicle_id))?
        .is_default;

    for vehicle in vehicles.iter_mut() {
        if vehicle.id == vehicle_id {
            vehicle.is_default = next_default;
        } else if next_default {
            vehicle.is_default = false;
        }
    }
    debug!(vehicle_id, is_default = next_default, "Default vehicle toggled");
    Ok(next_default)
}

pub fn default_vehicle(vehicles: &[Vehicle]) -> Option<&Vehicle> {
    vehicles.iter().find(|v| v.is_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_vehicles;

    #[test]
    fn selecting_makes_it_the_only_default() {
        let mut vehicles = sample_vehicles();
        assert!(toggle_default(&mut vehicles, 2).unwrap());
        assert_eq!(default_vehicle(&vehicles).map(|v| v.id), Some(2));
        assert_eq!(vehicles.iter().filter(|v| v.is_default).count(), 1);
    }

    #[test]
    fn unselecting_leaves_none() {
        let mut vehicles = sample_vehicles();
        assert!(!toggle_default(&mut vehicles, 1).unwrap());
        assert!(default_vehicle(&vehicles).is_none());
        assert_eq!(vehicles[1].role_label(), "Véhicule secondaire");
    }

    #[test]
    fn unknown_vehicle_is_an_error() {
        let mut vehicles = sample_vehicles();
        assert!(matches!(
            toggle_default(&mut vehicles, 42),
            Err(TripError::VehicleNotFound(42))
        ));
    }

    #[test]
    fn reads_backend_field_names() {
        let vehicle: Vehicle = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Peugeot 301",
            "default": true,
            "color": "blanc",
            "NM": "AA-1234-MD",
            "maximumPassenger": 4
        }))
        .unwrap();
        assert!(vehicle.is_default);
        assert_eq!(vehicle.registration, "AA-1234-MD");
    }
}
