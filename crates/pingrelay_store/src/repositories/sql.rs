//! SQL implementation of the device store
//!
//! One row per key in a `devices` table. Writes are a single upsert, so a
//! concurrent reader sees either the old row or the new one.

use crate::client::DbClient;
use crate::error::StoreError;
use crate::repository::DeviceStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use pingrelay_common::DeviceRegistration;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// Format SQLite's `strftime('%Y-%m-%d %H:%M:%f')` produces
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// SQL implementation of [`DeviceStore`]
#[derive(Debug, Clone)]
pub struct SqlDeviceStore {
    db_client: DbClient,
}

impl SqlDeviceStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Connect to `db_url` and make sure the schema exists.
    pub async fn connect(db_url: &str, max_connections: Option<u32>) -> Result<Self, StoreError> {
        let store = Self::new(DbClient::connect(db_url, max_connections).await?);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        debug!("Initializing device schema");

        // last_updated is TEXT: the Any driver cannot decode TIMESTAMP columns
        let query = r#"
            CREATE TABLE IF NOT EXISTS devices (
                id TEXT PRIMARY KEY NOT NULL,
                token TEXT NOT NULL,
                last_updated TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Device schema initialized successfully");
        Ok(())
    }
}

#[async_trait]
impl DeviceStore for SqlDeviceStore {
    async fn get(&self, key: &str) -> Result<Option<DeviceRegistration>, StoreError> {
        debug!("Reading device record: {}", key);

        let query = r#"
            SELECT token, last_updated
            FROM devices
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(key)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to read device record: {}", e);
                StoreError::QueryError(e.to_string())
            })?;

        row.as_ref().map(registration_from_row).transpose()
    }

    async fn put(&self, key: &str, token: &str) -> Result<DeviceRegistration, StoreError> {
        debug!("Writing device record: {}", key);

        let query = r#"
            INSERT INTO devices (id, token, last_updated)
            VALUES ($1, $2, strftime('%Y-%m-%d %H:%M:%f', 'now'))
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                last_updated = excluded.last_updated
            RETURNING token, last_updated
        "#;

        let row = sqlx::query(query)
            .bind(key)
            .bind(token)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to write device record: {}", e);
                StoreError::QueryError(e.to_string())
            })?;

        registration_from_row(&row)
    }
}

fn registration_from_row(row: &AnyRow) -> Result<DeviceRegistration, StoreError> {
    let token: String = row.try_get("token")?;
    let last_updated: String = row.try_get("last_updated")?;
    Ok(DeviceRegistration::new(token, parse_timestamp(&last_updated)?))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, SQLITE_TIMESTAMP_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::DecodeError(format!("last_updated {:?}: {}", value, e)))
}
