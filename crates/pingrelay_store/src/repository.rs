//! The storage seam behind the device registry
//!
//! Stores are key-value: one document per key, replaced wholesale on every
//! write. The relay only ever uses a single fixed key.

use async_trait::async_trait;
use pingrelay_common::DeviceRegistration;

use crate::error::StoreError;

/// Document-style storage for device registrations.
///
/// Implementations must make `put` atomic with respect to `get`: a reader sees
/// either the previous registration or the new one, never a mix.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Read the registration stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<DeviceRegistration>, StoreError>;

    /// Replace whatever is stored under `key` with `token`.
    ///
    /// The store assigns `last_updated` and returns the stored record.
    async fn put(&self, key: &str, token: &str) -> Result<DeviceRegistration, StoreError>;
}
