//! wifi-router: MCP surface for the simulated WiFi router.

pub mod config;
pub mod mcp;
