//! Configuration for PingRelay
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. `config/default.{toml,yaml,json}`
//! 3. `config/{RUN_ENV}.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
//! 4. environment variables such as `PINGRELAY__SERVER__PORT=8080`
//!
//! A `.env` file is loaded into the environment once before the sources are read.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Directory searched for config files when `CONFIG_DIR` is unset
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Loads the application configuration from the working directory and environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("firebase.fcm_endpoint", defaults.firebase.fcm_endpoint)?
        .set_default("store.backend", "firestore")?
        .set_default("store.collection", defaults.store.collection)?
        .set_default("store.document", defaults.store.document)?
        .set_default("store.firestore_endpoint", defaults.store.firestore_endpoint)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&env_vars::get_config_prefix())
                .prefix_separator(env_vars::CONFIG_SEPARATOR)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// `DOTENV_OVERRIDE` selects a different file than `.env`. A missing file is
/// not an error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("pingrelay-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = scratch_dir("empty");
        let config = load_config_from(&dir, "debug").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.backend, StoreBackend::Firestore);
        assert_eq!(config.store.collection, "devices");
        assert_eq!(config.store.document, "primary_receiver");
        assert_eq!(config.firebase.fcm_endpoint, "https://fcm.googleapis.com");
    }

    #[test]
    fn test_run_env_file_overrides_default_file() {
        let dir = scratch_dir("layered");
        fs::write(
            dir.join("default.toml"),
            "[server]\nport = 4000\n\n[store]\nbackend = \"memory\"\n",
        )
        .unwrap();
        fs::write(dir.join("production.toml"), "[server]\nport = 8080\n").unwrap();

        let config = load_config_from(&dir, "production").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
