//! wiki-mcp server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use wikicache_client::{IngestTarget, WikiService};
use wikicache_core::AppConfig;

mod error;
mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(cache_path = %config.cache_path.display(), "Starting wiki-mcp server on stdio transport");

    let service = Arc::new(WikiService::from_config(&config)?);

    if config.refresh_on_start {
        let background = Arc::clone(&service);
        tokio::spawn(async move {
            let report = background.trigger_ingestion(IngestTarget::All, false, None).await;
            tracing::info!(total = report.total, "startup refresh finished");
        });
    }

    let handler = handler::WikiMcpServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
