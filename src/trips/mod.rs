//! Trips seen by a passenger, trips published by a driver, and the driver's
//! vehicles.

pub mod drivers;
pub mod published;
pub mod recent;
pub mod vehicles;

use thiserror::Error;

pub use drivers::{nearby_drivers, NearbyDriver, OtherDriverRoute};
pub use published::{
    AllPassengersView, PassengerRequest, PassengerRoute, PassengerStatus, PublishedTrip,
    PublishedTripStatus, PublishedTrips,
};
pub use recent::{latest, open_trip_details, trips_with_status, DriverInfo, RecentTrip, StatusStyle, TripStatus};
pub use vehicles::{default_vehicle, toggle_default, Vehicle};

#[derive(Debug, Error)]
pub enum TripError {
    #[error("Trip {0} not found")]
    TripNotFound(String),
    #[error("Passenger {passenger_id} has no request on trip {trip_id}")]
    PassengerNotFound {
        trip_id: String,
        passenger_id: String,
    },
    #[error("Request of passenger {passenger_id} is already {status:?}")]
    AlreadyDecided {
        passenger_id: String,
        status: PassengerStatus,
    },
    #[error("{requested} seat(s) requested but only {available} left")]
    NotEnoughSeats { requested: u8, available: u8 },
    #[error("Vehicle {0} not found")]
    VehicleNotFound(u32),
}
