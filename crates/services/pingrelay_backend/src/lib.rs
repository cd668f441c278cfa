// --- File: crates/services/pingrelay_backend/src/lib.rs ---

pub mod app_state; // Shared handler state
#[cfg(feature = "openapi")]
pub mod doc; // OpenAPI document
pub mod handlers; // HTTP handlers
pub mod routes; // Router assembly
pub mod service_factory; // Startup wiring

pub use app_state::RelayState;
pub use routes::routes;
pub use service_factory::{RelayServiceFactory, StartupError};
