use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::controller::{StepForm, StepWizard};
use crate::validation::{self, FieldError, FieldResult};

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(19|20)\d{2}$").expect("year pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[serde(rename = "voiture")]
    Car,
    Moto,
}

impl VehicleType {
    /// Seat count applied when the type is picked.
    pub fn default_capacity(self) -> u8 {
        match self {
            VehicleType::Car => 6,
            VehicleType::Moto => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VehicleField {
    VehicleType,
    MaximumPassenger,
    VehicleName,
    Year,
    PlateNumber,
    LicenseNumber,
}

/// Vehicle registration form: type, vehicle details, driving license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    pub vehicle_type: Option<VehicleType>,
    pub maximum_passenger: u8,
    pub vehicle_name: String,
    pub year: String,
    pub plate_number: String,
    pub license_number: String,
    pub license_photo: Option<String>,
}

impl VehicleForm {
    /// Sets the type and derives the passenger capacity from it.
    pub fn set_vehicle_type(&mut self, vehicle_type: Option<VehicleType>) {
        self.vehicle_type = vehicle_type;
        self.maximum_passenger = vehicle_type.map_or(0, VehicleType::default_capacity);
    }
}

impl StepForm for VehicleForm {
    type Field = VehicleField;

    fn fields_by_step() -> Vec<Vec<VehicleField>> {
        vec![
            vec![VehicleField::VehicleType, VehicleField::MaximumPassenger],
            vec![
                VehicleField::VehicleName,
                VehicleField::Year,
                VehicleField::PlateNumber,
            ],
            vec![VehicleField::LicenseNumber],
        ]
    }

    fn validate_field(&self, field: VehicleField) -> FieldResult {
        match field {
            VehicleField::VehicleType => {
                validation::present(self.vehicle_type.as_ref(), "Choose a vehicle type")
            }
            VehicleField::MaximumPassenger => {
                if (1..=6).contains(&self.maximum_passenger) {
                    Ok(())
                } else {
                    Err(FieldError::new("Passenger capacity must be between 1 and 6"))
                }
            }
            VehicleField::VehicleName => {
                validation::required(&self.vehicle_name, "Vehicle name is required")
            }
            VehicleField::Year => validation::required(&self.year, "Year is required").and_then(
                |_| {
                    validation::matches(
                        self.year.trim(),
                        &YEAR_PATTERN,
                        "Enter a valid year (e.g. 2022)",
                    )
                },
            ),
            VehicleField::PlateNumber => {
                validation::required(&self.plate_number, "Plate number is required")
            }
            VehicleField::LicenseNumber => {
                validation::required(&self.license_number, "License number is required")
            }
        }
    }
}

pub type VehicleWizard = StepWizard<VehicleForm>;

pub fn vehicle_wizard() -> VehicleWizard {
    StepWizard::new(VehicleForm::default())
}
