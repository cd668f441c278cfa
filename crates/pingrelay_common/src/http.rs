// --- File: crates/pingrelay_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::error::{HttpStatusCode, RelayError};
use crate::models::MessageResponse;

/// Extension trait for RelayError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for RelayError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Detail goes to the log, the caller only gets the public message
        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        } else {
            warn!("Request rejected with {}: {}", status_code, self);
        }

        let body = Json(MessageResponse::new(self.public_message()));
        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for RelayError so handlers can return `Result<_, RelayError>`.
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{persistence_write_error, RelayError, NOT_REGISTERED, SAVE_FAILED};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_registered_is_bad_request() {
        let response = RelayError::NotRegistered.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], NOT_REGISTERED);
    }

    #[tokio::test]
    async fn test_persistence_error_body_is_generic() {
        let response = persistence_write_error("disk I/O error at /var/db").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], SAVE_FAILED);
        assert!(!body.to_string().contains("/var/db"));
    }
}
