use serde::{Deserialize, Serialize};

use crate::overlay::{SheetContent, SheetContext};
use crate::pricing::parse_fcfa;

/// Status of a trip taken as a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    #[serde(rename = "Termine")]
    Completed,
    #[serde(rename = "Annule")]
    Cancelled,
    #[serde(rename = "En attente")]
    Pending,
}

/// How a status badge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

impl TripStatus {
    /// Tab order on the recent trips screen.
    pub const TABS: [TripStatus; 3] = [TripStatus::Completed, TripStatus::Cancelled, TripStatus::Pending];

    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Completed => "Termine",
            TripStatus::Cancelled => "Annule",
            TripStatus::Pending => "En attente",
        }
    }

    pub fn style(self) -> StatusStyle {
        match self {
            TripStatus::Completed => StatusStyle {
                icon: "check-circle-outline",
                color: "#059669",
            },
            TripStatus::Cancelled => StatusStyle {
                icon: "close-circle-outline",
                color: "#dc2626",
            },
            TripStatus::Pending => StatusStyle {
                icon: "timer-outline",
                color: "#d97706",
            },
        }
    }

    /// Parses a tab name as typed on the command line (`termine`, `annule`,
    /// `en-attente`, or the English names).
    pub fn parse_tab(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "termine" | "completed" => Some(TripStatus::Completed),
            "annule" | "cancelled" => Some(TripStatus::Cancelled),
            "en attente" | "pending" => Some(TripStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub name: String,
    pub phone: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTrip {
    pub id: u32,
    pub from: String,
    pub to: String,
    pub date: String,
    pub price: String,
    pub status: TripStatus,
    pub driver: Option<DriverInfo>,
}

impl RecentTrip {
    pub fn price_fcfa(&self) -> Option<u32> {
        parse_fcfa(&self.price)
    }
}

pub fn trips_with_status(trips: &[RecentTrip], status: TripStatus) -> Vec<&RecentTrip> {
    trips.iter().filter(|t| t.status == status).collect()
}

/// The first `count` trips, as listed on the home screen.
pub fn latest(trips: &[RecentTrip], count: usize) -> &[RecentTrip] {
    &trips[..count.min(trips.len())]
}

/// Shows a trip in the sheet with the default snap point.
pub fn open_trip_details(trip: &RecentTrip, sheet: &mut SheetContext) {
    sheet.open(SheetContent::TripDetails(trip.clone()), Vec::<String>::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn tabs_partition_the_mock_trips() {
        let trips = data::recent_trips().unwrap();
        let total: usize = TripStatus::TABS
            .iter()
            .map(|s| trips_with_status(&trips, *s).len())
            .sum();
        assert_eq!(total, trips.len());
        assert_eq!(trips_with_status(&trips, TripStatus::Completed).len(), 2);
        assert_eq!(trips_with_status(&trips, TripStatus::Pending).len(), 2);
    }

    #[test]
    fn home_screen_shows_three() {
        let trips = data::recent_trips().unwrap();
        assert_eq!(latest(&trips, 3).len(), 3);
        assert_eq!(latest(&trips[..1], 3).len(), 1);
        assert_eq!(latest(&trips, 3)[0].from, "Bamako Centre");
    }

    #[test]
    fn pending_trips_may_have_no_driver() {
        let trips = data::recent_trips().unwrap();
        assert!(trips_with_status(&trips, TripStatus::Pending)
            .iter()
            .all(|t| t.driver.is_none()));
        assert_eq!(trips[0].price_fcfa(), Some(45000));
    }

    #[test]
    fn details_open_in_the_sheet() {
        let trips = data::recent_trips().unwrap();
        let mut sheet = SheetContext::new();
        open_trip_details(&trips[1], &mut sheet);
        assert_eq!(sheet.content(), Some(&SheetContent::TripDetails(trips[1].clone())));
        assert_eq!(sheet.snap_points(), ["50%"]);
    }

    #[test]
    fn parses_tab_names() {
        assert_eq!(TripStatus::parse_tab("en-attente"), Some(TripStatus::Pending));
        assert_eq!(TripStatus::parse_tab("Termine"), Some(TripStatus::Completed));
        assert_eq!(TripStatus::parse_tab("cancelled"), Some(TripStatus::Cancelled));
        assert_eq!(TripStatus::parse_tab("later"), None);
    }
}
