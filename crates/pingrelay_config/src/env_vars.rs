//! Environment variable handling for PingRelay.
//!
//! Configuration values can be overridden with prefixed variables such as
//! `PINGRELAY__SERVER__PORT`. The service account key path is read from
//! `RENDER_SECRET_FILE_PATH` (the secret-file mount used by Render
//! deployments) and then from Google's `GOOGLE_APPLICATION_CREDENTIALS`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "PINGRELAY";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Secret-file path of the service account key, checked first
pub const SECRET_FILE_ENV_VAR: &str = "RENDER_SECRET_FILE_PATH";

/// Google's standard variable for the service account key, checked second
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Credential variables in lookup order
pub const CREDENTIALS_ENV_VARS: [&str; 2] = [SECRET_FILE_ENV_VAR, CREDENTIALS_ENV_VAR];

/// Used when neither the environment nor the config name a key file
pub const DEFAULT_CREDENTIALS_PATH: &str = "./serviceAccountKey.json";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Reads [`CREDENTIALS_ENV_VARS`] in order, ignoring blank values.
pub fn credentials_path_from_env() -> Option<String> {
    credentials_path_from(|name| env::var(name).ok())
}

/// First non-blank credential path reported by `lookup`.
pub fn credentials_path_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    CREDENTIALS_ENV_VARS
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.trim().is_empty())
}

/// Pick the service account key path: environment, then config, then default.
pub fn resolve_credentials_path(from_env: Option<String>, configured: Option<&str>) -> String {
    from_env
        .or_else(|| {
            configured
                .filter(|path| !path.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string())
}
