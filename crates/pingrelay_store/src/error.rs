//! Error types for the device stores

use pingrelay_firebase::auth::AuthError;
use thiserror::Error;

/// Errors that can occur when reading or writing the device registration
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error from SQLx
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the store configuration
    #[error("Store configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Could not obtain an access token for the remote store
    #[error("Store authentication error: {0}")]
    AuthError(#[from] AuthError),

    /// Error during the HTTP request to the remote store
    #[error("Store request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The remote store answered with an error status
    #[error("Store API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A stored record could not be turned into a registration
    #[error("Malformed device record: {0}")]
    DecodeError(String),
}
