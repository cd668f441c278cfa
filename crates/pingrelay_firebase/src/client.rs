//! Firebase Cloud Messaging client module
//!
//! This module provides a client for the Firebase Cloud Messaging (FCM) HTTP v1 API,
//! the message structures it accepts, and the [`PushSender`] seam the dispatcher
//! talks to.
//!
//! A send is successful once FCM accepts the message. Delivery to the device
//! happens later and is not observed.

use crate::auth::{AccessTokenProvider, AuthError, FCM_SCOPE};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// FCM error code for a token that no longer belongs to an installed app
const UNREGISTERED: &str = "UNREGISTERED";

/// Errors that can occur when interacting with the Firebase Cloud Messaging API
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// FCM does not recognise the device token
    #[error("Device token rejected by FCM: {0}")]
    InvalidToken(String),

    /// Any other error returned by the Firebase API
    #[error("Firebase API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

/// A message to be sent via Firebase Cloud Messaging
///
/// This is the top-level structure that wraps a [`Message`]
/// according to the FCM HTTP v1 API format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FcmMessage {
    /// The message payload
    pub message: Message,
}

/// The message payload for Firebase Cloud Messaging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Registration token of the target device
    pub token: String,

    /// The notification to be displayed on the user's device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    /// Custom key-value data handed to the receiving app
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,

    /// Android specific delivery options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
}

/// The notification to be displayed on the user's device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// The title of the notification
    pub title: String,

    /// The body text of the notification
    pub body: String,
}

/// Android delivery hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<AndroidMessagePriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<AndroidNotification>,
}

/// Delivery priority on Android. HIGH wakes a dozing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AndroidMessagePriority {
    Normal,
    High,
}

/// Android notification display options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidNotification {
    /// Sound resource bundled with the receiving app
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,

    /// Notification channel the app created for this kind of alert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Response from the Firebase Cloud Messaging API
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// "projects/{project_id}/messages/{message_id}"
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleErrorDetail {
    #[serde(default)]
    error_code: Option<String>,
}

/// Something that can hand a message to the push-delivery service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Sends one message and returns the id assigned by the service.
    async fn send(&self, message: FcmMessage) -> Result<String, FirebaseError>;
}

/// Client for the Firebase Cloud Messaging HTTP v1 API
pub struct FirebaseClient {
    /// HTTP client for making requests to the FCM API
    client: Client,

    /// Base URL, "https://fcm.googleapis.com" in production
    endpoint: String,

    project_id: String,

    tokens: Arc<dyn AccessTokenProvider>,
}

impl FirebaseClient {
    /// Creates a new Firebase client
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the FCM API
    /// * `project_id` - The Firebase project the device tokens belong to
    /// * `tokens` - Source of OAuth2 access tokens
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            tokens,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint, self.project_id
        )
    }

    /// Sends a push notification message via Firebase Cloud Messaging
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// * Authentication fails
    /// * The HTTP request fails
    /// * FCM rejects the token or the message
    pub async fn send_message(&self, message: &FcmMessage) -> Result<String, FirebaseError> {
        let token = self.tokens.access_token(&[FCM_SCOPE]).await?;

        let response = self
            .client
            .post(self.send_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(classify_error(status.as_u16(), &error_text));
        }

        let fcm_response: FcmResponse = response.json().await?;
        debug!("FCM accepted message {}", fcm_response.name);
        Ok(fcm_response.name)
    }
}

#[async_trait]
impl PushSender for FirebaseClient {
    async fn send(&self, message: FcmMessage) -> Result<String, FirebaseError> {
        self.send_message(&message).await
    }
}

/// Maps an FCM error response onto [`FirebaseError`].
fn classify_error(status: u16, body: &str) -> FirebaseError {
    let Ok(parsed) = serde_json::from_str::<GoogleErrorBody>(body) else {
        return FirebaseError::ApiError {
            status,
            message: body.to_string(),
        };
    };

    let unregistered = parsed
        .error
        .details
        .iter()
        .any(|detail| detail.error_code.as_deref() == Some(UNREGISTERED));

    if unregistered {
        FirebaseError::InvalidToken(parsed.error.message)
    } else {
        FirebaseError::ApiError {
            status,
            message: parsed.error.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use serde_json::json;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message(token: &str) -> FcmMessage {
        FcmMessage {
            message: Message {
                token: token.to_string(),
                notification: Some(Notification {
                    title: "Hello".to_string(),
                    body: "World".to_string(),
                }),
                data: None,
                android: None,
            },
        }
    }

    fn client(server: &MockServer) -> FirebaseClient {
        FirebaseClient::new(
            server.uri(),
            "demo-project",
            Arc::new(StaticToken("test-token".to_string())),
        )
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(message("abc")).unwrap();
        assert_eq!(
            json,
            json!({
                "message": {
                    "token": "abc",
                    "notification": { "title": "Hello", "body": "World" }
                }
            })
        );
    }

    #[test]
    fn test_android_priority_serializes_upper_case() {
        let config = AndroidConfig {
            priority: Some(AndroidMessagePriority::High),
            notification: Some(AndroidNotification {
                sound: Some("alarm".to_string()),
                channel_id: Some("alerts".to_string()),
            }),
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["notification"]["channel_id"], "alerts");
    }

    #[tokio::test]
    async fn test_send_message_returns_message_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/demo-project/messages:send"))
            .and(header_matcher("authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "name": "projects/demo-project/messages/42" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let name = client(&server).send_message(&message("abc")).await.unwrap();
        assert_eq!(name, "projects/demo-project/messages/42");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["message"]["token"], "abc");
    }

    #[tokio::test]
    async fn test_unregistered_token_is_invalid_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/projects/demo-project/messages:send"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 404,
                    "message": "Requested entity was not found.",
                    "status": "NOT_FOUND",
                    "details": [{
                        "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                        "errorCode": "UNREGISTERED"
                    }]
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .send_message(&message("stale"))
            .await
            .unwrap_err();
        assert!(matches!(err, FirebaseError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_other_api_errors_keep_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
            .mount(&server)
            .await;

        let err = client(&server)
            .send_message(&message("abc"))
            .await
            .unwrap_err();
        match err {
            FirebaseError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "backend unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
