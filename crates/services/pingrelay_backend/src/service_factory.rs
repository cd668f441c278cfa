//! Service factory implementation.
//!
//! Wires the configured device store and the FCM client into a [`RelayState`].
//! Credentials are loaded exactly once here and shared by both.

use pingrelay_config::AppConfig;
use pingrelay_firebase::auth::{
    AccessTokenProvider, AuthError, ServiceAccountCredentials, StaticToken,
};
use pingrelay_firebase::client::FirebaseClient;
use pingrelay_firebase::NotificationDispatcher;
use pingrelay_store::{DeviceRegistry, DeviceStoreFactory, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::app_state::RelayState;

/// Reasons the relay cannot start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load Google credentials: {0}")]
    Credentials(#[from] AuthError),

    #[error("No Firebase project id configured and none found in the service account key")]
    MissingProjectId,

    #[error("Failed to open device store: {0}")]
    Store(#[from] StoreError),
}

pub struct RelayServiceFactory {
    config: Arc<AppConfig>,
}

impl RelayServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Load credentials, open the device store and build the dispatcher.
    ///
    /// With `firebase.static_token` set, that token is used for every call
    /// and no key file is read; `firebase.project_id` is then required.
    pub async fn build(&self) -> Result<RelayState, StartupError> {
        if let Some(token) = &self.config.firebase.static_token {
            let project_id = self
                .config
                .firebase
                .project_id
                .clone()
                .ok_or(StartupError::MissingProjectId)?;
            warn!("Using a static bearer token for project {}", project_id);

            let tokens: Arc<dyn AccessTokenProvider> = Arc::new(StaticToken(token.clone()));
            return Self::assemble(&self.config, project_id, tokens).await;
        }

        let key_path = self.config.firebase.resolved_key_path();
        let credentials = ServiceAccountCredentials::load(&key_path).await?;

        let project_id = self
            .config
            .firebase
            .project_id
            .clone()
            .or_else(|| credentials.project_id().map(str::to_string))
            .ok_or(StartupError::MissingProjectId)?;
        info!("Using Firebase project {}", project_id);

        let tokens: Arc<dyn AccessTokenProvider> = Arc::new(credentials);
        Self::assemble(&self.config, project_id, tokens).await
    }

    /// Build the state from already loaded credentials.
    pub async fn assemble(
        config: &AppConfig,
        project_id: String,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<RelayState, StartupError> {
        let sender = FirebaseClient::new(
            config.firebase.fcm_endpoint.clone(),
            project_id.clone(),
            tokens.clone(),
        );
        let dispatcher = NotificationDispatcher::new(Arc::new(sender));

        let store = DeviceStoreFactory::new(config.store.clone())
            .with_google(project_id, tokens)
            .create()
            .await?;
        let registry = DeviceRegistry::with_key(store, config.store.document.clone());

        Ok(RelayState::new(registry, dispatcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingrelay_config::{env_vars, StoreBackend, StoreConfig};

    fn memory_config() -> AppConfig {
        AppConfig {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                ..StoreConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_key_file_fails_startup() {
        // A credential variable in the environment would take precedence over key_path
        if env_vars::credentials_path_from_env().is_some() {
            return;
        }

        let mut config = AppConfig::default();
        config.firebase.key_path = Some("/nonexistent/pingrelay-key.json".to_string());

        let result = RelayServiceFactory::new(Arc::new(config)).build().await;
        assert!(matches!(result, Err(StartupError::Credentials(_))));
    }

    #[tokio::test]
    async fn test_assemble_with_memory_store() {
        let config = memory_config();

        let state = RelayServiceFactory::assemble(
            &config,
            "demo-project".to_string(),
            Arc::new(StaticToken("owner".to_string())),
        )
        .await
        .unwrap();

        assert!(state.registry.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_token_skips_key_file() {
        let mut config = memory_config();
        config.firebase.project_id = Some("demo-project".to_string());
        config.firebase.key_path = Some("/nonexistent/pingrelay-key.json".to_string());
        config.firebase.static_token = Some("owner".to_string());

        let state = RelayServiceFactory::new(Arc::new(config))
            .build()
            .await
            .unwrap();
        assert!(state.registry.fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_token_requires_project_id() {
        let mut config = memory_config();
        config.firebase.static_token = Some("owner".to_string());

        let result = RelayServiceFactory::new(Arc::new(config)).build().await;
        assert!(matches!(result, Err(StartupError::MissingProjectId)));
    }
}
