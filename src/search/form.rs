use chrono::{NaiveDate, NaiveTime};

use crate::geo::RoutePoint;
use crate::validation::{self, FieldResult};
use crate::wizard::{StepForm, StepWizard};

pub const MAX_SEATS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchField {
    Departure,
    Arrival,
    Date,
    Time,
    Seats,
}

/// Trip search: endpoints, then date and time, then seats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSearchForm {
    pub departure: Option<RoutePoint>,
    pub arrival: Option<RoutePoint>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// As typed; validated as an integer seat count
    pub seats: String,
}

impl TripSearchForm {
    pub fn seat_count(&self) -> Option<u8> {
        self.seats.trim().parse().ok()
    }
}

impl StepForm for TripSearchForm {
    type Field = SearchField;

    fn fields_by_step() -> Vec<Vec<SearchField>> {
        vec![
            vec![SearchField::Departure, SearchField::Arrival],
            vec![SearchField::Date, SearchField::Time],
            vec![SearchField::Seats],
        ]
    }

    fn validate_field(&self, field: SearchField) -> FieldResult {
        match field {
            SearchField::Departure => {
                validation::present(self.departure.as_ref(), "Choose a departure point")
            }
            SearchField::Arrival => {
                validation::present(self.arrival.as_ref(), "Choose an arrival point")
            }
            SearchField::Date => validation::present(self.date.as_ref(), "Choose a date"),
            SearchField::Time => validation::present(self.time.as_ref(), "Choose a time"),
            SearchField::Seats => validation::int_in_range(
                &self.seats,
                1,
                MAX_SEATS,
                "Seats must be between 1 and 6",
            ),
        }
    }
}

pub type TripSearchWizard = StepWizard<TripSearchForm>;
