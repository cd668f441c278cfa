//! In-process device store. Contents are lost when the process exits.

use crate::error::StoreError;
use crate::repository::DeviceStore;
use async_trait::async_trait;
use chrono::Utc;
use pingrelay_common::DeviceRegistration;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, DeviceRegistration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<DeviceRegistration>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, token: &str) -> Result<DeviceRegistration, StoreError> {
        let registration = DeviceRegistration::new(token, Utc::now());
        self.records
            .write()
            .await
            .insert(key.to_string(), registration.clone());
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryStore::new();
        store.put("a", "token-a").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().unwrap().token, "token-a");
        assert!(store.get("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("a", "first").await.unwrap();
        store.put("a", "second").await.unwrap();

        assert_eq!(store.get("a").await.unwrap().unwrap().token, "second");
    }
}
