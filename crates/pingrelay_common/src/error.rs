// --- File: crates/pingrelay_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Public message for a missing or empty token.
pub const TOKEN_REQUIRED: &str = "Token is required.";

/// Public message when no receiver has registered yet.
pub const NOT_REGISTERED: &str = "No receiver device is registered.";

/// Public message for a failed registry write.
pub const SAVE_FAILED: &str = "Failed to save token.";

/// Public message for any other server-side failure.
pub const PROCESSING_FAILED: &str = "Error processing request.";

/// Which side of the store an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Write,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::Read => write!(f, "read"),
            StoreOp::Write => write!(f, "write"),
        }
    }
}

/// The error type surfaced by the relay's components.
///
/// The `Display` output carries internal detail for logs. What callers see is
/// [`RelayError::public_message`].
#[derive(Error, Debug)]
pub enum RelayError {
    /// Required input was missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// No device has registered a token yet
    #[error("No receiver device is registered")]
    NotRegistered,

    /// The device store was unreachable or rejected the operation
    #[error("Persistence error ({op}): {detail}")]
    Persistence { op: StoreOp, detail: String },

    /// The push-delivery service failed or rejected the message
    #[error("Delivery error: {0}")]
    Delivery(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RelayError {
    fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) => 400,
            // Kept at 400 rather than 404 for client compatibility
            RelayError::NotRegistered => 400,
            RelayError::Persistence { .. } => 500,
            RelayError::Delivery(_) => 500,
        }
    }
}

impl RelayError {
    /// The message returned to HTTP callers. Never includes internal detail.
    pub fn public_message(&self) -> &str {
        match self {
            RelayError::Validation(message) => message,
            RelayError::NotRegistered => NOT_REGISTERED,
            RelayError::Persistence {
                op: StoreOp::Write, ..
            } => SAVE_FAILED,
            RelayError::Persistence {
                op: StoreOp::Read, ..
            } => PROCESSING_FAILED,
            RelayError::Delivery(_) => PROCESSING_FAILED,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> RelayError {
    RelayError::Validation(message.to_string())
}

pub fn persistence_read_error<T: fmt::Display>(detail: T) -> RelayError {
    RelayError::Persistence {
        op: StoreOp::Read,
        detail: detail.to_string(),
    }
}

pub fn persistence_write_error<T: fmt::Display>(detail: T) -> RelayError {
    RelayError::Persistence {
        op: StoreOp::Write,
        detail: detail.to_string(),
    }
}

pub fn delivery_error<T: fmt::Display>(detail: T) -> RelayError {
    RelayError::Delivery(detail.to_string())
}
