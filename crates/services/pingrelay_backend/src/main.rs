// File: services/pingrelay_backend/src/main.rs
use pingrelay_backend::{routes, RelayServiceFactory};
use pingrelay_common::logging;
use pingrelay_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    logging::init_from_str(&config.logging.level);

    let state = RelayServiceFactory::new(config.clone()).build().await?;
    let app = routes(Arc::new(state));

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
