// --- File: crates/pingrelay_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error responses
pub mod logging; // Logging utilities
pub mod models; // Shared data structures

// Re-export error types and utilities for easier access
pub use error::{
    delivery_error, persistence_read_error, persistence_write_error, validation_error,
    HttpStatusCode, RelayError, StoreOp, NOT_REGISTERED, PROCESSING_FAILED, SAVE_FAILED,
    TOKEN_REQUIRED,
};

pub use http::IntoHttpResponse;

pub use models::{DeviceRegistration, MessageResponse, PRIMARY_RECEIVER};
