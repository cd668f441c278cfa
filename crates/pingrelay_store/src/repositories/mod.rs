//! Device store implementations

pub mod firestore;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sql;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sql::SqlDeviceStore;
