//! MCP binary configuration: flags with environment fallbacks.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// JSON-RPC over HTTP POST at /sse
    StreamableHttp,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "router_mcp")]
#[command(about = "WiFi Router MCP Server")]
pub struct McpConfig {
    /// Transport type to use
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value = "stdio")]
    pub transport: Transport,

    /// Host for the streamable HTTP server
    #[arg(long, env = "MCP_HTTP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the streamable HTTP server
    #[arg(long, env = "MCP_HTTP_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "ROUTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl McpConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
