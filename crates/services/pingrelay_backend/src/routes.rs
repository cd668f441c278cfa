use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::app_state::RelayState;
use crate::handlers::{register_device_handler, send_normal_handler, send_panic_handler};

/// Create the gateway router
///
/// Serves the three relay endpoints plus a welcome string at `/`. With the
/// `openapi` feature the Swagger UI is mounted at `/docs`.
pub fn routes(state: Arc<RelayState>) -> Router {
    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut router = Router::new()
        .route("/", get(|| async { "Welcome to PingRelay!" }))
        .route("/register-device", post(register_device_handler))
        .route("/send-normal", post(send_normal_handler))
        .route("/send-panic", post(send_panic_handler))
        .with_state(state);

    #[cfg(feature = "openapi")]
    {
        use crate::doc::RelayApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /docs");
        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", RelayApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    info!("Relay routes initialized");

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
