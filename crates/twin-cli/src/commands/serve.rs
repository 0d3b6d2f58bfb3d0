//! `twin-mcp serve` command.
//!
//! Starts the MCP server over stdio or HTTP. One handler (and one store
//! handle) lives for the whole process.

use std::sync::Arc;

use clap::Args;

use twin_config::TwinConfig;
use twin_transport_http::{ApiKeys, AppState, HttpServer};
use twin_transport_stdio::{McpServer, StdioTransport};

use crate::shared;

/// Start the MCP server (stdio or HTTP).
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport mode: stdio (default) or http.
    #[arg(long, default_value = "stdio", value_parser = ["stdio", "http"])]
    pub transport: String,
    /// Bind address for HTTP; overrides `http.host`.
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port for HTTP; overrides `http.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &TwinConfig) -> anyhow::Result<()> {
    let handler = shared::build_handler(config).await;
    let timeout = config.server.request_timeout();

    match args.transport.as_str() {
        "http" => {
            if config.http.api_keys.is_empty() {
                tracing::warn!("no API keys configured; every /mcp request will be rejected");
            }
            let state = AppState {
                handler: Arc::new(handler),
                api_keys: Arc::new(ApiKeys::new(config.http.api_keys.iter().cloned())),
                request_timeout: timeout,
                cors: config.http.cors,
            };
            let host = args.host.clone().unwrap_or_else(|| config.http.host.clone());
            let port = args.port.unwrap_or(config.http.port);
            HttpServer::new(state, host, port)
                .run(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("shutdown signal received");
                })
                .await
                .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ => {
            let mut server = McpServer::new(StdioTransport::stdio(), handler, timeout);
            tracing::info!("MCP server ready on stdio");
            tokio::select! {
                result = server.run() => {
                    result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
    }

    Ok(())
}
