//! The device registry
//!
//! Holds the one receiver the relay delivers to. Registration replaces the
//! previous receiver outright; there is no history and no per-user slot.

use crate::repository::DeviceStore;
use pingrelay_common::{
    persistence_read_error, persistence_write_error, validation_error, DeviceRegistration,
    RelayError, PRIMARY_RECEIVER, TOKEN_REQUIRED,
};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct DeviceRegistry {
    store: Arc<dyn DeviceStore>,
    key: String,
}

impl DeviceRegistry {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self::with_key(store, PRIMARY_RECEIVER)
    }

    /// A registry whose record lives under `key` instead of [`PRIMARY_RECEIVER`].
    pub fn with_key(store: Arc<dyn DeviceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Store `token` as the current receiver.
    ///
    /// An empty or whitespace-only token is rejected and the stored record is
    /// left untouched.
    pub async fn register(&self, token: &str) -> Result<DeviceRegistration, RelayError> {
        if token.trim().is_empty() {
            return Err(validation_error(TOKEN_REQUIRED));
        }

        let registration = self.store.put(&self.key, token).await.map_err(|e| {
            error!("Failed to save receiver token: {}", e);
            persistence_write_error(e)
        })?;

        info!("Receiver registered at {}", registration.last_updated);
        Ok(registration)
    }

    /// The current receiver, or `None` before the first registration.
    pub async fn fetch(&self) -> Result<Option<DeviceRegistration>, RelayError> {
        debug!("Fetching receiver {}", self.key);
        self.store.get(&self.key).await.map_err(|e| {
            error!("Failed to read receiver: {}", e);
            persistence_read_error(e)
        })
    }
}
