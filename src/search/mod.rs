//! Trip search screen: map picker, three-step form and recap.

pub mod form;
pub mod picker;
pub mod recap;

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::info;

pub use form::{SearchField, TripSearchForm, TripSearchWizard};
pub use picker::{PointField, RoutePicker};
pub use recap::{directions_url, format_date, format_time, TripRecap};

use crate::geo::{Geocoder, RouteProvider};
use crate::overlay::{SheetContent, SheetContext};
use crate::wizard::StepOutcome;

const RECAP_SNAP: &str = "72%";

/// The picker and the form kept in step: confirmed endpoints are copied into
/// the form.
#[derive(Debug)]
pub struct TripSearch {
    picker: RoutePicker,
    wizard: TripSearchWizard,
}

impl TripSearch {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn RouteProvider>) -> Self {
        Self {
            picker: RoutePicker::new(geocoder, router),
            wizard: TripSearchWizard::new(TripSearchForm::default()),
        }
    }

    pub fn picker(&self) -> &RoutePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut RoutePicker {
        &mut self.picker
    }

    pub fn wizard(&self) -> &TripSearchWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut TripSearchWizard {
        &mut self.wizard
    }

    /// Confirms the picker's pending point and copies the endpoints into the
    /// form.
    pub async fn confirm_point(&mut self) -> bool {
        let confirmed = self.picker.confirm().await;
        if confirmed {
            let form = self.wizard.form_mut();
            form.departure = self.picker.departure().cloned();
            form.arrival = self.picker.arrival().cloned();
        }
        confirmed
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.wizard.form_mut().date = Some(date);
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.wizard.form_mut().time = Some(time);
    }

    pub fn set_seats(&mut self, seats: impl Into<String>) {
        self.wizard.form_mut().seats = seats.into();
    }

    pub fn next_step(&mut self) -> StepOutcome {
        self.wizard.go_to_next_step()
    }

    pub fn recap(&self) -> Option<TripRecap> {
        TripRecap::from_form(self.wizard.form(), self.picker.route())
    }

    /// Validates the whole form and shows the recap. Returns `false` and
    /// leaves the sheet alone when the form is incomplete.
    pub fn open_recap(&mut self, sheet: &mut SheetContext) -> bool {
        if self.wizard.submit().is_none() {
            return false;
        }
        let Some(recap) = self.recap() else {
            return false;
        };
        info!(
            distance_km = recap.distance_km,
            price = recap.estimated_price,
            seats = recap.seats,
            "Trip recap ready"
        );
        sheet.open(SheetContent::TripRecap(recap), [RECAP_SNAP]);
        true
    }

    pub fn reset(&mut self) {
        self.picker.reset();
        self.wizard = TripSearchWizard::new(TripSearchForm::default());
    }
}
