//! Database client for the SQL store
//!
//! A thin wrapper around an SQLx `Any` pool, so the same store code runs
//! against whichever driver the URL names.

use crate::error::StoreError;
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database client over a pooled SQLx connection
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Connect to `db_url`.
    ///
    /// For file-backed SQLite URLs the parent directory and an empty database
    /// file are created when missing.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty or invalid
    /// * The database file cannot be created
    /// * The database connection fails
    pub async fn connect(db_url: &str, max_connections: Option<u32>) -> Result<Self, StoreError> {
        if db_url.is_empty() {
            return Err(StoreError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, max_connections).await?;
        Ok(Self { pool })
    }

    async fn create_pool(
        db_url: &str,
        max_connections: Option<u32>,
    ) -> Result<Pool<sqlx::Any>, StoreError> {
        debug!("Creating database pool with URL: {}", db_url);

        sqlx::any::install_default_drivers();

        let pool_options = PoolOptions::new()
            .max_connections(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        if let Some(db_path) = sqlite_file_path(db_url) {
            ensure_sqlite_file(db_path)?;
        }

        let pool = pool_options
            .connect_with(sqlx::any::AnyConnectOptions::from_str(db_url)?)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                StoreError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows
    pub async fn execute(&self, query: &str) -> Result<u64, StoreError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| StoreError::QueryError(e.to_string()))
    }
}

/// File path of a SQLite URL, or `None` for other drivers and in-memory databases.
///
/// Accepts both "sqlite:data.db" and "sqlite://data.db".
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}

fn ensure_sqlite_file(db_path: &str) -> Result<(), StoreError> {
    let path = Path::new(db_path);

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating directory for SQLite database: {:?}", dir);
            std::fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory for SQLite database: {}", e);
                StoreError::PoolError(format!("Failed to create directory: {}", e))
            })?;
        }
    }

    if !path.exists() {
        debug!("Creating empty SQLite database file: {}", db_path);
        std::fs::File::create(path).map_err(|e| {
            error!("Failed to create SQLite database file: {}", e);
            StoreError::PoolError(format!("Failed to create database file: {}", e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/relay.db"), Some("data/relay.db"));
        assert_eq!(sqlite_file_path("sqlite:relay.db?mode=rwc"), Some("relay.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/relay"), None);
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected() {
        let err = DbClient::connect("", None).await.unwrap_err();
        assert!(matches!(err, StoreError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_in_memory_database_executes() {
        let client = DbClient::connect("sqlite::memory:", Some(1)).await.unwrap();
        client
            .execute("CREATE TABLE scratch (id TEXT PRIMARY KEY)")
            .await
            .unwrap();
        let inserted = client
            .execute("INSERT INTO scratch (id) VALUES ('a')")
            .await
            .unwrap();
        assert_eq!(inserted, 1);
    }
}
