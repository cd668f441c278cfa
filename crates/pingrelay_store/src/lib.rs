//! Device registry persistence for PingRelay
//!
//! The registry keeps a single receiver record. Where it lives is decided by
//! the store backend:
//!
//! - `firestore` (default): a document in Cloud Firestore, via the REST API
//! - `sqlite`: a row in a local SQLite database (requires the `sqlite` feature, on by default)
//! - `memory`: process memory, for tests and local runs
//!
//! # Example
//!
//! ```rust,no_run
//! use pingrelay_config::{StoreBackend, StoreConfig};
//! use pingrelay_store::{DeviceRegistry, DeviceStoreFactory};
//!
//! async fn register() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig {
//!         backend: StoreBackend::Memory,
//!         ..StoreConfig::default()
//!     };
//!     let store = DeviceStoreFactory::new(config).create().await?;
//!     let registry = DeviceRegistry::new(store);
//!
//!     registry.register("device-token").await?;
//!     assert!(registry.fetch().await?.is_some());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "sqlite")]
pub mod client;
pub mod error;
pub mod factory;
pub mod registry;
pub mod repositories;
pub mod repository;

#[cfg(feature = "sqlite")]
pub use client::DbClient;
pub use error::StoreError;
pub use factory::DeviceStoreFactory;
pub use registry::DeviceRegistry;
pub use repositories::{FirestoreStore, MemoryStore};
#[cfg(feature = "sqlite")]
pub use repositories::SqlDeviceStore;
pub use repository::DeviceStore;
