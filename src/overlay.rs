//! Bottom sheet shared by the screens.
//!
//! A [`SheetContext`] is owned by the caller and handed to every operation
//! that presents something in the sheet.

use tracing::debug;

use crate::geo::MapRegion;
use crate::search::TripRecap;
use crate::trips::{AllPassengersView, PassengerRoute, PublishedTrip, RecentTrip, Vehicle};

pub const DEFAULT_SNAP_POINT: &str = "50%";

/// What the sheet is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetContent {
    TripDetails(RecentTrip),
    PublishedTrip(PublishedTrip),
    PassengerRoute {
        passenger_name: String,
        route: PassengerRoute,
        region: MapRegion,
    },
    AllPassengers(AllPassengersView),
    TripRecap(TripRecap),
    VehicleDetails(Vehicle),
}

impl SheetContent {
    fn kind(&self) -> &'static str {
        match self {
            SheetContent::TripDetails(_) => "trip_details",
            SheetContent::PublishedTrip(_) => "published_trip",
            SheetContent::PassengerRoute { .. } => "passenger_route",
            SheetContent::AllPassengers(_) => "all_passengers",
            SheetContent::TripRecap(_) => "trip_recap",
            SheetContent::VehicleDetails(_) => "vehicle_details",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetContext {
    is_open: bool,
    content: Option<SheetContent>,
    snap_points: Vec<String>,
}

impl Default for SheetContext {
    fn default() -> Self {
        Self {
            is_open: false,
            content: None,
            snap_points: vec![DEFAULT_SNAP_POINT.to_string()],
        }
    }
}

impl SheetContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn content(&self) -> Option<&SheetContent> {
        self.content.as_ref()
    }

    pub fn snap_points(&self) -> &[String] {
        &self.snap_points
    }

    /// Replaces whatever is shown. An empty snap list keeps the default.
    pub fn open<I, S>(&mut self, content: SheetContent, snap_points: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut snap_points: Vec<String> = snap_points.into_iter().map(Into::into).collect();
        if snap_points.is_empty() {
            snap_points.push(DEFAULT_SNAP_POINT.to_string());
        }
        debug!(kind = content.kind(), ?snap_points, "Sheet opened");
        self.is_open = true;
        self.content = Some(content);
        self.snap_points = snap_points;
    }

    /// Hides the sheet and drops its content. Snap points are kept.
    pub fn close(&mut self) {
        if self.is_open {
            debug!("Sheet closed");
        }
        self.is_open = false;
        self.content = None;
    }

    /// Mirrors a position change reported by the sheet; index -1 means the
    /// user dragged it away.
    pub fn on_position_changed(&mut self, index: i32) {
        if index == -1 {
            self.close();
        }
    }
}
