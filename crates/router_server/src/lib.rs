//! router_server: REST surface over [`router_core::RouterService`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
