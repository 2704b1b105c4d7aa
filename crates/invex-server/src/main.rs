//! HTTP server for invoice document parsing.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use invex_core::{InvoicePipeline, OpenAiChatClient};
use invex_server::config::AppConfig;
use invex_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let AppConfig {
        server: server_config,
        model,
    } = AppConfig::from_env()?;

    let client = OpenAiChatClient::new(model.api_base, model.api_key, model.model.clone());
    let pipeline = Arc::new(InvoicePipeline::new(Arc::new(client)));
    tracing::info!(model = %model.model, "extraction pipeline ready");

    server::serve(&server_config, pipeline).await?;
    Ok(())
}
