use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::TripError;
use crate::geo::{region_between, region_for_points, Coordinate, MapRegion};
use crate::overlay::{SheetContent, SheetContext};

/// Snap point of the single passenger map sheet.
const PASSENGER_MAP_SNAP: &str = "50%";
/// Snap point of the all passengers map sheet.
const ALL_PASSENGERS_MAP_SNAP: &str = "60%";
/// Snap point of the trip management sheet.
const TRIP_SHEET_SNAP: &str = "72%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublishedTripStatus {
    #[serde(rename = "En attente")]
    Pending,
    #[serde(rename = "En cours")]
    InProgress,
    #[serde(rename = "Termine")]
    Completed,
    #[serde(rename = "Annule")]
    Cancelled,
}

impl PublishedTripStatus {
    pub fn label(self) -> &'static str {
        match self {
            PublishedTripStatus::Pending => "En attente",
            PublishedTripStatus::InProgress => "En cours",
            PublishedTripStatus::Completed => "Termine",
            PublishedTripStatus::Cancelled => "Annule",
        }
    }

    pub fn style(self) -> super::StatusStyle {
        use super::TripStatus;
        match self {
            PublishedTripStatus::InProgress => super::StatusStyle {
                icon: "car-outline",
                color: "#2563eb",
            },
            PublishedTripStatus::Pending => TripStatus::Pending.style(),
            PublishedTripStatus::Completed => TripStatus::Completed.style(),
            PublishedTripStatus::Cancelled => TripStatus::Cancelled.style(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A passenger asking for seats on a published trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRequest {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub rating: f32,
    pub status: PassengerStatus,
    pub seats: u8,
    pub requested_at: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    #[serde(default)]
    pub route_coordinates: Vec<Coordinate>,
}

impl PassengerRequest {
    pub fn pickup(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.pickup_lat?, self.pickup_lng?))
    }

    pub fn drop_off(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.drop_lat?, self.drop_lng?))
    }

    /// Pending and accepted requests are drawn on the trip map.
    pub fn is_active(&self) -> bool {
        matches!(self.status, PassengerStatus::Pending | PassengerStatus::Accepted)
    }
}

/// A trip published by the signed-in driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedTrip {
    pub id: String,
    pub from: String,
    pub to: String,
    pub date: String,
    pub time: String,
    pub price: String,
    pub status: PublishedTripStatus,
    pub available_seats: u8,
    pub total_seats: u8,
    pub vehicle_name: String,
    pub passengers: Vec<PassengerRequest>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    #[serde(default)]
    pub route_coordinates: Vec<Coordinate>,
}

impl PublishedTrip {
    pub fn passenger(&self, passenger_id: &str) -> Option<&PassengerRequest> {
        self.passengers.iter().find(|p| p.id == passenger_id)
    }

    pub fn pending_passengers(&self) -> impl Iterator<Item = &PassengerRequest> {
        self.passengers
            .iter()
            .filter(|p| p.status == PassengerStatus::Pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending_passengers().count()
    }

    /// Route of one passenger, falling back to the trip's own route.
    pub fn passenger_route(&self, passenger: &PassengerRequest) -> PassengerRoute {
        let coordinates = if passenger.route_coordinates.is_empty() {
            self.route_coordinates.clone()
        } else {
            passenger.route_coordinates.clone()
        };
        let pickup = passenger.pickup().or_else(|| coordinates.first().copied());
        let drop_off = passenger.drop_off().or_else(|| coordinates.last().copied());
        PassengerRoute {
            coordinates,
            pickup,
            drop_off,
        }
    }

    /// Map of the trip route plus every active passenger route.
    ///
    /// `None` when no passenger is pending or accepted.
    pub fn all_passengers_view(&self) -> Option<AllPassengersView> {
        let active: Vec<&PassengerRequest> =
            self.passengers.iter().filter(|p| p.is_active()).collect();
        if active.is_empty() {
            return None;
        }

        let mut points = self.route_coordinates.clone();
        for passenger in &active {
            points.extend_from_slice(&passenger.route_coordinates);
        }

        Some(AllPassengersView {
            trip_id: self.id.clone(),
            region: region_for_points(&points),
            trip_route: self.route_coordinates.clone(),
            passengers: active
                .into_iter()
                .map(|p| (p.id.clone(), self.passenger_route(p)))
                .collect(),
        })
    }
}

/// Resolved route of a passenger request.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRoute {
    pub coordinates: Vec<Coordinate>,
    pub pickup: Option<Coordinate>,
    pub drop_off: Option<Coordinate>,
}

impl PassengerRoute {
    /// Region framing pickup and drop-off, when both are known.
    pub fn region(&self) -> Option<MapRegion> {
        Some(region_between(self.pickup?, self.drop_off?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllPassengersView {
    pub trip_id: String,
    pub region: MapRegion,
    pub trip_route: Vec<Coordinate>,
    pub passengers: Vec<(String, PassengerRoute)>,
}

/// The driver's published trips and the decisions taken on their requests.
#[derive(Debug, Clone, Default)]
pub struct PublishedTrips {
    trips: Vec<PublishedTrip>,
}

impl PublishedTrips {
    pub fn new(trips: Vec<PublishedTrip>) -> Self {
        Self { trips }
    }

    pub fn trips(&self) -> &[PublishedTrip] {
        &self.trips
    }

    pub fn find(&self, trip_id: &str) -> Result<&PublishedTrip, TripError> {
        self.trips
            .iter()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| TripError::TripNotFound(trip_id.to_string()))
    }

    fn pending_request(
        &mut self,
        trip_id: &str,
        passenger_id: &str,
    ) -> Result<(&mut u8, &mut PassengerRequest), TripError> {
        let trip = self
            .trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| TripError::TripNotFound(trip_id.to_string()))?;
        let passenger = trip
            .passengers
            .iter_mut()
            .find(|p| p.id == passenger_id)
            .ok_or_else(|| TripError::PassengerNotFound {
                trip_id: trip_id.to_string(),
                passenger_id: passenger_id.to_string(),
            })?;
        if passenger.status != PassengerStatus::Pending {
            return Err(TripError::AlreadyDecided {
                passenger_id: passenger_id.to_string(),
                status: passenger.status,
            });
        }
        Ok((&mut trip.available_seats, passenger))
    }

    /// Accepts a pending request and books its seats. Closes the sheet.
    pub fn accept_passenger(
        &mut self,
        trip_id: &str,
        passenger_id: &str,
        sheet: &mut SheetContext,
    ) -> Result<(), TripError> {
        let (available_seats, passenger) = self.pending_request(trip_id, passenger_id)?;
        if passenger.seats > *available_seats {
            return Err(TripError::NotEnoughSeats {
                requested: passenger.seats,
                available: *available_seats,
            });
        }
        *available_seats -= passenger.seats;
        passenger.status = PassengerStatus::Accepted;
        info!(trip_id, passenger_id, seats = passenger.seats, "Passenger accepted");
        sheet.close();
        Ok(())
    }

    /// Rejects a pending request. Closes the sheet.
    pub fn reject_passenger(
        &mut self,
        trip_id: &str,
        passenger_id: &str,
        sheet: &mut SheetContext,
    ) -> Result<(), TripError> {
        let (_, passenger) = self.pending_request(trip_id, passenger_id)?;
        passenger.status = PassengerStatus::Rejected;
        info!(trip_id, passenger_id, "Passenger rejected");
        sheet.close();
        Ok(())
    }

    pub fn open_trip_sheet(&self, trip_id: &str, sheet: &mut SheetContext) -> Result<(), TripError> {
        let trip = self.find(trip_id)?;
        sheet.open(SheetContent::PublishedTrip(trip.clone()), [TRIP_SHEET_SNAP]);
        Ok(())
    }

    /// Shows one passenger's route. Returns `false` when pickup or drop-off
    /// cannot be resolved and nothing was opened.
    pub fn open_passenger_map(
        &self,
        trip_id: &str,
        passenger_id: &str,
        sheet: &mut SheetContext,
    ) -> Result<bool, TripError> {
        let trip = self.find(trip_id)?;
        let passenger = trip
            .passenger(passenger_id)
            .ok_or_else(|| TripError::PassengerNotFound {
                trip_id: trip_id.to_string(),
                passenger_id: passenger_id.to_string(),
            })?;

        let route = trip.passenger_route(passenger);
        let Some(region) = route.region() else {
            debug!(trip_id, passenger_id, "Passenger route has no endpoints");
            return Ok(false);
        };

        sheet.open(
            SheetContent::PassengerRoute {
                passenger_name: passenger.name.clone(),
                route,
                region,
            },
            [PASSENGER_MAP_SNAP],
        );
        Ok(true)
    }

    /// Shows every active passenger route. Returns `false` when there is none.
    pub fn open_all_passengers_map(
        &self,
        trip_id: &str,
        sheet: &mut SheetContext,
    ) -> Result<bool, TripError> {
        let Some(view) = self.find(trip_id)?.all_passengers_view() else {
            return Ok(false);
        };
        sheet.open(SheetContent::AllPassengers(view), [ALL_PASSENGERS_MAP_SNAP]);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::geo::DEFAULT_REGION;

    fn trips() -> PublishedTrips {
        PublishedTrips::new(data::published_trips().unwrap())
    }

    #[test]
    fn accepting_books_seats_and_closes_the_sheet() {
        let mut trips = trips();
        let mut sheet = SheetContext::default();
        trips.open_trip_sheet("1", &mut sheet).unwrap();
        assert!(sheet.is_open());

        trips.accept_passenger("1", "p2", &mut sheet).unwrap();
        let trip = trips.find("1").unwrap();
        assert_eq!(trip.available_seats, 0);
        assert_eq!(trip.passenger("p2").unwrap().status, PassengerStatus::Accepted);
        assert!(!sheet.is_open());
    }

    #[test]
    fn accepting_fails_without_enough_seats() {
        let mut trips = trips();
        let mut sheet = SheetContext::default();
        trips.accept_passenger("1", "p2", &mut sheet).unwrap();

        let err = trips.accept_passenger("1", "p1", &mut sheet).unwrap_err();
        assert!(matches!(
            err,
            TripError::NotEnoughSeats {
                requested: 1,
                available: 0
            }
        ));
        assert_eq!(
            trips.find("1").unwrap().passenger("p1").unwrap().status,
            PassengerStatus::Pending
        );
    }

    #[test]
    fn only_pending_requests_can_be_decided() {
        let mut trips = trips();
        let mut sheet = SheetContext::default();
        let err = trips.reject_passenger("1", "p3", &mut sheet).unwrap_err();
        assert!(matches!(err, TripError::AlreadyDecided { .. }));

        trips.reject_passenger("2", "p4", &mut sheet).unwrap();
        assert_eq!(trips.find("2").unwrap().available_seats, 3);
        assert!(matches!(
            trips.accept_passenger("2", "p4", &mut sheet),
            Err(TripError::AlreadyDecided { .. })
        ));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut trips = trips();
        let mut sheet = SheetContext::default();
        assert!(matches!(
            trips.accept_passenger("9", "p1", &mut sheet),
            Err(TripError::TripNotFound(_))
        ));
        assert!(matches!(
            trips.accept_passenger("1", "p9", &mut sheet),
            Err(TripError::PassengerNotFound { .. })
        ));
    }

    #[test]
    fn passenger_route_falls_back_to_the_trip() {
        let mut trip = trips().find("1").unwrap().clone();
        let mut passenger = trip.passengers[0].clone();
        passenger.route_coordinates.clear();
        passenger.pickup_lat = None;
        passenger.drop_lng = None;

        let route = trip.passenger_route(&passenger);
        assert_eq!(route.coordinates, trip.route_coordinates);
        assert_eq!(route.pickup, trip.route_coordinates.first().copied());
        assert_eq!(route.drop_off, trip.route_coordinates.last().copied());

        trip.route_coordinates.clear();
        let route = trip.passenger_route(&passenger);
        assert_eq!(route.pickup, None);
        assert_eq!(route.region(), None);
    }

    #[test]
    fn passenger_map_frames_pickup_and_drop() {
        let trips = trips();
        let mut sheet = SheetContext::default();
        assert!(trips.open_passenger_map("1", "p1", &mut sheet).unwrap());
        match sheet.content() {
            Some(SheetContent::PassengerRoute { region, .. }) => {
                assert!((region.latitude - (12.62 + 12.5334) / 2.0).abs() < 1e-9);
                assert!(region.latitude_delta >= 0.05);
            }
            other => panic!("unexpected sheet content: {other:?}"),
        }
        assert_eq!(sheet.snap_points(), ["50%"]);
    }

    #[test]
    fn all_passengers_map_needs_an_active_request() {
        let trips = trips();
        let mut sheet = SheetContext::default();
        assert!(!trips.open_all_passengers_map("3", &mut sheet).unwrap());
        assert!(!sheet.is_open());

        let view = trips.find("1").unwrap().all_passengers_view().unwrap();
        assert_eq!(view.passengers.len(), 3);
        assert_ne!(view.region, DEFAULT_REGION);
    }
}
