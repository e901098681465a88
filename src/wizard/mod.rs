//! Multi-step forms gated by validation.

pub mod controller;
pub mod vehicle;

pub use controller::{StepForm, StepOutcome, StepWizard};
pub use vehicle::{vehicle_wizard, VehicleField, VehicleForm, VehicleType, VehicleWizard};
