//! Factory for creating device stores
//!
//! Picks the [`DeviceStore`] implementation named by the store configuration.

use crate::error::StoreError;
use crate::repositories::{FirestoreStore, MemoryStore};
use crate::repository::DeviceStore;
use pingrelay_config::{StoreBackend, StoreConfig};
use pingrelay_firebase::auth::AccessTokenProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Factory for creating device stores
#[derive(Clone)]
pub struct DeviceStoreFactory {
    config: StoreConfig,
    project_id: Option<String>,
    tokens: Option<Arc<dyn AccessTokenProvider>>,
}

impl DeviceStoreFactory {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            project_id: None,
            tokens: None,
        }
    }

    /// Google project and credentials used by the Firestore backend.
    pub fn with_google(
        mut self,
        project_id: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        self.project_id = Some(project_id.into());
        self.tokens = Some(tokens);
        self
    }

    /// Create the configured store
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * Firestore is selected but no project or credentials were supplied
    /// * SQLite is selected without a database URL, or the crate was built without the `sqlite` feature
    /// * The database connection or schema initialisation fails
    pub async fn create(&self) -> Result<Arc<dyn DeviceStore>, StoreError> {
        debug!("Creating {:?} device store", self.config.backend);

        let store: Arc<dyn DeviceStore> = match self.config.backend {
            StoreBackend::Firestore => {
                let (Some(project_id), Some(tokens)) = (&self.project_id, &self.tokens) else {
                    return Err(StoreError::ConfigError(
                        "Firestore store requires a project id and credentials".to_string(),
                    ));
                };
                Arc::new(FirestoreStore::new(
                    self.config.firestore_endpoint.clone(),
                    project_id.clone(),
                    self.config.collection.clone(),
                    tokens.clone(),
                ))
            }
            StoreBackend::Sqlite => self.create_sql_store().await?,
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };

        info!("Device store ready ({:?})", self.config.backend);
        Ok(store)
    }

    #[cfg(feature = "sqlite")]
    async fn create_sql_store(&self) -> Result<Arc<dyn DeviceStore>, StoreError> {
        let db_url = self.config.database_url.as_deref().ok_or_else(|| {
            StoreError::ConfigError("store.database_url is required for sqlite".to_string())
        })?;
        let store =
            crate::repositories::SqlDeviceStore::connect(db_url, self.config.max_connections)
                .await?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn create_sql_store(&self) -> Result<Arc<dyn DeviceStore>, StoreError> {
        Err(StoreError::ConfigError(
            "sqlite store requested but the `sqlite` feature is disabled".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingrelay_firebase::auth::StaticToken;

    fn config(backend: StoreBackend) -> StoreConfig {
        StoreConfig {
            backend,
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn test_memory_store_is_empty() {
        let store = DeviceStoreFactory::new(config(StoreBackend::Memory))
            .create()
            .await
            .unwrap();
        assert!(store.get("primary_receiver").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_firestore_requires_google_access() {
        let result = DeviceStoreFactory::new(config(StoreBackend::Firestore))
            .create()
            .await;
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_firestore_with_google_access() {
        let result = DeviceStoreFactory::new(config(StoreBackend::Firestore))
            .with_google("demo-project", Arc::new(StaticToken("owner".to_string())))
            .create()
            .await;
        assert!(result.is_ok());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_sqlite_requires_database_url() {
        let result = DeviceStoreFactory::new(config(StoreBackend::Sqlite))
            .create()
            .await;
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_sqlite_store_from_config() {
        let store = DeviceStoreFactory::new(StoreConfig {
            database_url: Some("sqlite::memory:".to_string()),
            max_connections: Some(1),
            ..config(StoreBackend::Sqlite)
        })
        .create()
        .await
        .unwrap();

        store.put("primary_receiver", "abc").await.unwrap();
        assert_eq!(
            store.get("primary_receiver").await.unwrap().unwrap().token,
            "abc"
        );
    }
}
