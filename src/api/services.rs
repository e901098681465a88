//! Backend endpoints used by the screens.

use super::{ApiClient, ApiError};
use crate::trips::{PassengerRequest, Vehicle};

pub const ROUTE_PASSENGERS_KEY: &str = "route-passengers";
pub const VEHICLES_KEY: &str = "vehicules";

pub async fn get_route_passengers(api: &ApiClient) -> Result<Vec<PassengerRequest>, ApiError> {
    api.query(ROUTE_PASSENGERS_KEY, "route-passengers").await
}

pub async fn get_vehicles(api: &ApiClient) -> Result<Vec<Vehicle>, ApiError> {
    api.query(VEHICLES_KEY, "vehicules").await
}
