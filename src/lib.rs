// ilicoo Library - carpooling client flows for Bamako
// This exposes the core components for the CLI and integration tests

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod device;
pub mod geo;
pub mod overlay;
pub mod pricing;
pub mod search;
pub mod session;
pub mod telemetry;
pub mod trips;
pub mod validation;
pub mod verification;
pub mod wizard;

// Re-export key types for easy access
pub use api::{ApiClient, ApiError};
pub use config::{config, init_config, IlicooConfig, Platform};
pub use geo::{Coordinate, GeoError, Geocoder, MapRegion, RoutePoint, RouteProvider, RouteSummary};
pub use overlay::{SheetContent, SheetContext};
pub use pricing::{estimate_price, format_fcfa, MINIMUM_FARE};
pub use session::{AuthClient, CredentialStore, SessionError};
pub use telemetry::{create_flow_span, generate_correlation_id, init_telemetry};
pub use trips::TripError;
pub use verification::{spawn_verification, OtpSession, VerifyOutcome};
pub use wizard::{StepForm, StepOutcome, StepWizard};
