//! Firestore implementation of the device store
//!
//! Talks to the Firestore REST API. Each key is a document in one collection;
//! `put` is a single commit that overwrites the document and stamps
//! `lastUpdated` with the server's request time.

use crate::error::StoreError;
use crate::repository::DeviceStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pingrelay_common::DeviceRegistration;
use pingrelay_firebase::auth::{AccessTokenProvider, DATASTORE_SCOPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

const TOKEN_FIELD: &str = "token";
const LAST_UPDATED_FIELD: &str = "lastUpdated";

/// A Firestore value. Only the kinds the registry stores are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp_value: Option<DateTime<Utc>>,
}

impl FieldValue {
    fn string(value: &str) -> Self {
        Self {
            string_value: Some(value.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
    /// Set by Firestore on reads, never sent
    #[serde(default, skip_serializing)]
    update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Write {
    update: Document,
    update_transforms: Vec<FieldTransform>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldTransform {
    field_path: String,
    set_to_server_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    write_results: Vec<WriteResult>,
    #[serde(default)]
    commit_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResult {
    #[serde(default)]
    transform_results: Vec<FieldValue>,
}

impl CommitResponse {
    /// The server timestamp written into `lastUpdated`.
    fn server_timestamp(&self) -> Option<DateTime<Utc>> {
        self.write_results
            .first()
            .and_then(|result| result.transform_results.first())
            .and_then(|value| value.timestamp_value)
            .or(self.commit_time)
    }
}

/// [`DeviceStore`] backed by Cloud Firestore
pub struct FirestoreStore {
    client: Client,
    /// "https://firestore.googleapis.com" in production
    endpoint: String,
    project_id: String,
    collection: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl FirestoreStore {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        collection: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            collection: collection.into(),
            tokens,
        }
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    fn document_name(&self, key: &str) -> String {
        format!(
            "{}/documents/{}/{}",
            self.database_path(),
            self.collection,
            key
        )
    }

    async fn bearer(&self) -> Result<String, StoreError> {
        Ok(self.tokens.access_token(&[DATASTORE_SCOPE]).await?)
    }

    async fn api_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        error!("Firestore returned {}: {}", status, message);
        StoreError::ApiError { status, message }
    }
}

#[async_trait]
impl DeviceStore for FirestoreStore {
    async fn get(&self, key: &str) -> Result<Option<DeviceRegistration>, StoreError> {
        let name = self.document_name(key);
        debug!("Reading Firestore document {}", name);

        let response = self
            .client
            .get(format!("{}/v1/{}", self.endpoint, name))
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let document: Document = response.json().await?;
        registration_from_document(&document).map(Some)
    }

    async fn put(&self, key: &str, token: &str) -> Result<DeviceRegistration, StoreError> {
        let name = self.document_name(key);
        debug!("Writing Firestore document {}", name);

        let request = CommitRequest {
            writes: vec![Write {
                update: Document {
                    name: Some(name),
                    fields: HashMap::from([(TOKEN_FIELD.to_string(), FieldValue::string(token))]),
                    update_time: None,
                },
                update_transforms: vec![FieldTransform {
                    field_path: LAST_UPDATED_FIELD.to_string(),
                    set_to_server_value: "REQUEST_TIME".to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/{}/documents:commit",
                self.endpoint,
                self.database_path()
            ))
            .bearer_auth(self.bearer().await?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let commit: CommitResponse = response.json().await?;
        let last_updated = commit.server_timestamp().ok_or_else(|| {
            StoreError::DecodeError("commit response carried no timestamp".to_string())
        })?;

        Ok(DeviceRegistration::new(token, last_updated))
    }
}

/// Documents written by other clients may lack `lastUpdated`; the document's
/// own `updateTime` stands in for it.
fn registration_from_document(document: &Document) -> Result<DeviceRegistration, StoreError> {
    let fields = &document.fields;
    let token = fields
        .get(TOKEN_FIELD)
        .and_then(|value| value.string_value.clone())
        .ok_or_else(|| StoreError::DecodeError("missing token field".to_string()))?;
    let last_updated = fields
        .get(LAST_UPDATED_FIELD)
        .and_then(|value| value.timestamp_value)
        .or(document.update_time)
        .ok_or_else(|| StoreError::DecodeError("missing lastUpdated field".to_string()))?;

    Ok(DeviceRegistration::new(token, last_updated))
}
