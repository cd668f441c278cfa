#![allow(dead_code)]
use pingrelay_common::MessageResponse;
use utoipa::OpenApi;

use crate::handlers::RegisterDeviceRequest;

#[utoipa::path(
    post,
    path = "/register-device",
    request_body(content = RegisterDeviceRequest, example = json!({
        "token": "fcm-registration-token-example"
    })),
    responses(
        (status = 200, description = "Token stored as the receiver", body = MessageResponse,
         example = json!({ "message": "Device token saved successfully." })
        ),
        (status = 400, description = "Missing or empty token", body = MessageResponse,
         example = json!({ "message": "Token is required." })
        ),
        (status = 500, description = "Store unavailable", body = MessageResponse,
         example = json!({ "message": "Failed to save token." })
        )
    ),
    tag = "Relay"
)]
fn doc_register_device_handler() {}

#[utoipa::path(
    post,
    path = "/send-normal",
    responses(
        (status = 200, description = "Ping accepted by FCM", body = MessageResponse,
         example = json!({ "message": "Normal notification sent." })
        ),
        (status = 400, description = "No receiver registered", body = MessageResponse,
         example = json!({ "message": "No receiver device is registered." })
        ),
        (status = 500, description = "Store or FCM failure", body = MessageResponse,
         example = json!({ "message": "Error processing request." })
        )
    ),
    tag = "Relay"
)]
fn doc_send_normal_handler() {}

#[utoipa::path(
    post,
    path = "/send-panic",
    responses(
        (status = 200, description = "Panic alert accepted by FCM", body = MessageResponse,
         example = json!({ "message": "Panic notification sent." })
        ),
        (status = 400, description = "No receiver registered", body = MessageResponse,
         example = json!({ "message": "No receiver device is registered." })
        ),
        (status = 500, description = "Store or FCM failure", body = MessageResponse,
         example = json!({ "message": "Error processing request." })
        )
    ),
    tag = "Relay"
)]
fn doc_send_panic_handler() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PingRelay API",
        version = "0.1.0",
        description = "Register a receiver device and push alerts to it",
    ),
    paths(
        doc_register_device_handler,
        doc_send_normal_handler,
        doc_send_panic_handler,
    ),
    components(schemas(RegisterDeviceRequest, MessageResponse)),
    tags(
        (name = "Relay", description = "Device registration and alert dispatch")
    )
)]
pub struct RelayApiDoc;
