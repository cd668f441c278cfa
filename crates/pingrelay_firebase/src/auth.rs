//! Service account authentication for Google APIs
//!
//! The key file is read once at startup. The resulting authenticator caches
//! access tokens per scope set and refreshes them on expiry, so the same
//! credentials serve both FCM and Firestore.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use yup_oauth2::{
    authenticator::DefaultAuthenticator, read_service_account_key, ServiceAccountAuthenticator,
};

/// Scope required by the FCM HTTP v1 API
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Scope required by the Firestore REST API
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Errors that can occur while obtaining an access token
#[derive(Error, Debug)]
pub enum AuthError {
    /// The service account key file could not be read or parsed
    #[error("Failed to read service account key {path}: {source}")]
    KeyFile {
        path: String,
        source: std::io::Error,
    },

    /// The authenticator could not be constructed from the key
    #[error("Failed to build authenticator: {0}")]
    Authenticator(std::io::Error),

    /// Google's token endpoint refused or failed the request
    #[error("Token request failed: {0}")]
    Token(#[from] yup_oauth2::Error),

    /// The token endpoint answered without a token
    #[error("No token available")]
    EmptyToken,
}

/// Source of OAuth2 bearer tokens for Google APIs.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a bearer token valid for all of `scopes`.
    async fn access_token(&self, scopes: &[&str]) -> Result<String, AuthError>;
}

/// Credentials backed by a Google service account key file
pub struct ServiceAccountCredentials {
    authenticator: DefaultAuthenticator,
    project_id: Option<String>,
}

impl ServiceAccountCredentials {
    /// Reads the key at `key_path` and prepares an authenticator for it.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The key file is missing or not a valid service account key
    /// * The authenticator cannot be built
    pub async fn load(key_path: &str) -> Result<Self, AuthError> {
        debug!("Reading service account key from {}", key_path);
        let key = read_service_account_key(Path::new(key_path))
            .await
            .map_err(|source| AuthError::KeyFile {
                path: key_path.to_string(),
                source,
            })?;
        let project_id = key.project_id.clone();

        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(AuthError::Authenticator)?;

        info!(
            "Loaded service account credentials (project: {})",
            project_id.as_deref().unwrap_or("<unset>")
        );
        Ok(Self {
            authenticator,
            project_id,
        })
    }

    /// The project id recorded in the key file, if any
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountCredentials {
    async fn access_token(&self, scopes: &[&str]) -> Result<String, AuthError> {
        let token = self.authenticator.token(scopes).await?;
        match token.token() {
            Some(token) => Ok(token.to_string()),
            None => Err(AuthError::EmptyToken),
        }
    }
}

/// A fixed bearer token.
///
/// Selected by `firebase.static_token`. The Firebase emulators accept
/// `Bearer owner`.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self, _scopes: &[&str]) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_file_names_the_path() {
        let result = ServiceAccountCredentials::load("/nonexistent/pingrelay-key.json").await;
        match result {
            Err(err @ AuthError::KeyFile { .. }) => {
                assert!(err.to_string().contains("/nonexistent/pingrelay-key.json"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("loading a missing key must fail"),
        }
    }

    #[tokio::test]
    async fn test_static_token_ignores_scopes() {
        let provider = StaticToken("owner".to_string());
        let token = provider.access_token(&[FCM_SCOPE, DATASTORE_SCOPE]).await.unwrap();
        assert_eq!(token, "owner");
    }
}
