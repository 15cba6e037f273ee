//! router_server: standalone REST server for the WiFi router simulator.
//!
//! Reads config from flags or env vars (a `.env` file is honoured):
//!   ROUTER_HTTP_HOST : listen host (default: 127.0.0.1)
//!   ROUTER_HTTP_PORT : listen port (default: 8000)
//!   ROUTER_LOG_LEVEL : log level when RUST_LOG is unset (default: info)

use anyhow::Context;
use clap::Parser;
use router_core::{RouterService, RouterState};
use router_server::config::ServerConfig;
use router_server::router::build_router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter().into()),
        )
        .init();

    let service = RouterService::new(RouterState::default());
    let app = build_router(service);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("router_server listening on http://{bind_addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
