// --- File: crates/pingrelay_config/src/models.rs ---

use serde::{Deserialize, Serialize};

use crate::env_vars;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// --- Firebase Config ---
// The service account key itself never lives in the config, only its path.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    /// Falls back to the `project_id` found in the service account key.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Overridden by RENDER_SECRET_FILE_PATH or GOOGLE_APPLICATION_CREDENTIALS when set.
    #[serde(default)]
    pub key_path: Option<String>,
    /// Fixed bearer token sent instead of service account tokens.
    /// For the Firebase emulators, which accept `owner`; no key file is read.
    #[serde(default)]
    pub static_token: Option<String>,
    /// Base URL of the FCM HTTP v1 API.
    pub fcm_endpoint: String,
}

impl FirebaseConfig {
    /// Path of the service account key to load at startup.
    ///
    /// The environment variables win over the configured path, and the
    /// configured path wins over [`env_vars::DEFAULT_CREDENTIALS_PATH`].
    pub fn resolved_key_path(&self) -> String {
        env_vars::resolve_credentials_path(
            env_vars::credentials_path_from_env(),
            self.key_path.as_deref(),
        )
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            key_path: None,
            static_token: None,
            fcm_endpoint: "https://fcm.googleapis.com".to_string(),
        }
    }
}

// --- Store Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Firestore,
    Sqlite,
    Memory,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Firestore collection holding the receiver document
    pub collection: String,
    /// Fixed key of the single registration record
    pub document: String,
    pub firestore_endpoint: String,
    /// Only read by the sqlite backend, e.g. "sqlite://data/pingrelay.db"
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Firestore,
            collection: "devices".to_string(),
            document: "primary_receiver".to_string(),
            firestore_endpoint: "https://firestore.googleapis.com".to_string(),
            database_url: None,
            max_connections: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            logging: LoggingConfig::default(),
            firebase: FirebaseConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
