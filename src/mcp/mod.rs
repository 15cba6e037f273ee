//! MCP (Model Context Protocol) Server Module
//!
//! Exposes the router simulator as an MCP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        MCP Client                            │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ JSON-RPC over stdio or POST /sse
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      MCP Server (Rust)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  resources/list, resources/read   router://devices ...       │
//! │  tools/list, tools/call           scan_networks ...          │
//! │  prompts/list, prompts/get        troubleshoot_connection ...│
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                router_core::RouterService                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin router_mcp
//! cargo run --bin router_mcp -- --transport streamable-http --port 3001
//! ```

pub mod handlers;
#[cfg(feature = "streamable-http")]
pub mod http;
pub mod protocol;
pub mod server;

pub use server::McpServer;
