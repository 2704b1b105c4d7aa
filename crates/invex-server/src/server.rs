//! Router construction and serve loop.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tracing::info;

use invex_core::InvoicePipeline;

use crate::api;
use crate::config::ServerConfig;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<InvoicePipeline>,
}

/// Build the application router around an already constructed pipeline.
pub fn build_router(pipeline: Arc<InvoicePipeline>) -> Router {
    let state = AppState { pipeline };

    // Body limit sits above the 10 MB cap so oversized uploads reach the
    // handler's 400 instead of a transport-level rejection.
    Router::new()
        .route("/health", get(api::health_check))
        .route("/parse-invoice", post(api::parse_invoice))
        .layer(DefaultBodyLimit::max(api::MAX_FILE_SIZE * 2))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, pipeline: Arc<InvoicePipeline>) -> std::io::Result<()> {
    let app = build_router(pipeline);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on {addr}");

    axum::serve(listener, app).await
}
