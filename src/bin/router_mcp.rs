//! WiFi Router MCP Server Binary
//!
//! ## Usage
//!
//! ```bash
//! ./target/debug/router_mcp                                  # stdio
//! ./target/debug/router_mcp --transport streamable-http      # HTTP on :3001
//! ```
//!
//! ## Environment Variables
//!
//! - `MCP_TRANSPORT`: `stdio` (default) or `streamable-http`
//! - `MCP_HTTP_HOST` / `MCP_HTTP_PORT`: bind address for the HTTP transport
//! - `ROUTER_LOG_LEVEL`: log level when `RUST_LOG` is unset
//!
//! Logs always go to stderr; stdout carries protocol traffic only.

use anyhow::Result;
use clap::Parser;
use router_core::{RouterService, RouterState};
use wifi_router::config::{McpConfig, Transport};
use wifi_router::mcp::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = McpConfig::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .init();

    let server = McpServer::new(RouterService::new(RouterState::default()));

    match config.transport {
        Transport::Stdio => server.run_stdio().await,
        Transport::StreamableHttp => serve_http(server, &config).await,
    }
}

#[cfg(feature = "streamable-http")]
async fn serve_http(server: McpServer, config: &McpConfig) -> Result<()> {
    use anyhow::Context;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("router_mcp listening on http://{bind_addr}/sse");

    axum::serve(listener, wifi_router::mcp::http::build_router(server))
        .await
        .context("server error")
}

#[cfg(not(feature = "streamable-http"))]
async fn serve_http(_server: McpServer, _config: &McpConfig) -> Result<()> {
    anyhow::bail!("built without the `streamable-http` feature")
}
