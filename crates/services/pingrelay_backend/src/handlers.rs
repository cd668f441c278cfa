//! HTTP handlers for the relay gateway
//!
//! Every response body is `{ "message": ... }`. Failures are returned as
//! [`RelayError`] and rendered by its `IntoResponse` impl.

use axum::{
    body::Bytes,
    extract::{Json, State},
};
use pingrelay_common::{MessageResponse, RelayError};
use pingrelay_firebase::AlertKind;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app_state::RelayState;

pub const TOKEN_SAVED: &str = "Device token saved successfully.";
pub const NORMAL_SENT: &str = "Normal notification sent.";
pub const PANIC_SENT: &str = "Panic notification sent.";

/// Request body for registering the receiver device
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterDeviceRequest {
    /// FCM registration token of the receiving device
    #[serde(default)]
    pub token: Option<String>,
}

impl RegisterDeviceRequest {
    /// Lenient parse: an empty, non-JSON or mistyped body reads as "no token".
    fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[axum::debug_handler]
pub async fn register_device_handler(
    State(state): State<Arc<RelayState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, RelayError> {
    let request = RegisterDeviceRequest::from_body(&body);
    debug!("Register request (token present: {})", request.token.is_some());

    state
        .registry
        .register(request.token.as_deref().unwrap_or_default())
        .await?;

    info!("Receiver device token saved");
    Ok(Json(MessageResponse::new(TOKEN_SAVED)))
}

#[axum::debug_handler]
pub async fn send_normal_handler(
    State(state): State<Arc<RelayState>>,
) -> Result<Json<MessageResponse>, RelayError> {
    send_alert(&state, AlertKind::Normal).await?;
    Ok(Json(MessageResponse::new(NORMAL_SENT)))
}

#[axum::debug_handler]
pub async fn send_panic_handler(
    State(state): State<Arc<RelayState>>,
) -> Result<Json<MessageResponse>, RelayError> {
    send_alert(&state, AlertKind::Panic).await?;
    Ok(Json(MessageResponse::new(PANIC_SENT)))
}

/// Look up the receiver, then dispatch. The read completes before any send.
async fn send_alert(state: &RelayState, kind: AlertKind) -> Result<(), RelayError> {
    let receiver = state
        .registry
        .fetch()
        .await?
        .ok_or(RelayError::NotRegistered)?;

    state.dispatcher.dispatch(kind, &receiver.token).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_parsing_is_lenient() {
        assert_eq!(
            RegisterDeviceRequest::from_body(br#"{"token":"abc"}"#).token.as_deref(),
            Some("abc")
        );
        assert!(RegisterDeviceRequest::from_body(b"").token.is_none());
        assert!(RegisterDeviceRequest::from_body(b"token=abc").token.is_none());
        assert!(RegisterDeviceRequest::from_body(br#"{"token":42}"#).token.is_none());
        assert!(RegisterDeviceRequest::from_body(br#"{"other":"x"}"#).token.is_none());
    }
}
