use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use super::form::TripSearchForm;
use crate::geo::{RoutePoint, RouteSummary};
use crate::pricing::{estimate_price, format_fcfa};

/// Summary shown before a search is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecap {
    pub departure: RoutePoint,
    pub arrival: RoutePoint,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub seats: u8,
    pub distance_km: f64,
    pub duration_min: u32,
    pub estimated_price: u32,
}

impl TripRecap {
    /// `None` unless every field of the form is filled and valid.
    pub fn from_form(form: &TripSearchForm, route: &RouteSummary) -> Option<Self> {
        let seats = form.seat_count().filter(|s| (1..=6).contains(s))?;
        Some(Self {
            departure: form.departure.clone()?,
            arrival: form.arrival.clone()?,
            date: form.date?,
            time: form.time?,
            seats,
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            estimated_price: estimate_price(route.distance_km),
        })
    }

    pub fn formatted_date(&self) -> String {
        format_date(self.date)
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.time)
    }

    pub fn formatted_price(&self) -> String {
        format_fcfa(self.estimated_price)
    }

    pub fn directions_url(&self) -> String {
        directions_url(&self.departure, &self.arrival)
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lun.",
        Weekday::Tue => "mar.",
        Weekday::Wed => "mer.",
        Weekday::Thu => "jeu.",
        Weekday::Fri => "ven.",
        Weekday::Sat => "sam.",
        Weekday::Sun => "dim.",
    }
}

/// French short date, e.g. `lun. 03/03/2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", weekday_short(date.weekday()), date.format("%d/%m/%Y"))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Driving directions in the external maps app.
pub fn directions_url(from: &RoutePoint, to: &RoutePoint) -> String {
    format!(
        "http://maps.apple.com/?saddr={},{}&daddr={},{}&dirflg=d",
        from.latitude, from.longitude, to.latitude, to.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn form() -> TripSearchForm {
        TripSearchForm {
            departure: Some(RoutePoint::new(Coordinate::new(12.6337, -8.0059), "Hamdallaye")),
            arrival: Some(RoutePoint::new(Coordinate::new(12.5334, -7.9499), "Aeroport")),
            date: NaiveDate::from_ymd_opt(2025, 3, 3),
            time: NaiveTime::from_hms_opt(14, 30, 0),
            seats: "2".to_string(),
        }
    }

    #[test]
    fn formats_like_the_french_locale() {
        let recap = TripRecap::from_form(&form(), &RouteSummary {
            coordinates: Vec::new(),
            distance_km: 10.0,
            duration_min: 18,
        })
        .unwrap();
        assert_eq!(recap.formatted_date(), "lun. 03/03/2025");
        assert_eq!(recap.formatted_time(), "14:30");
        assert_eq!(recap.formatted_price(), "3 750 FCFA");
        assert_eq!(recap.seats, 2);
    }

    #[test]
    fn incomplete_form_has_no_recap() {
        let mut incomplete = form();
        incomplete.time = None;
        assert!(TripRecap::from_form(&incomplete, &RouteSummary::empty()).is_none());

        let mut bad_seats = form();
        bad_seats.seats = "9".to_string();
        assert!(TripRecap::from_form(&bad_seats, &RouteSummary::empty()).is_none());
    }

    #[test]
    fn builds_directions_url() {
        let f = form();
        let url = directions_url(f.departure.as_ref().unwrap(), f.arrival.as_ref().unwrap());
        assert_eq!(
            url,
            "http://maps.apple.com/?saddr=12.6337,-8.0059&daddr=12.5334,-7.9499&dirflg=d"
        );
    }
}
