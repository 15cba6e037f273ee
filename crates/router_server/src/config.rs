//! Server configuration: command-line flags with environment fallbacks.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "router_server")]
#[command(about = "REST API for the simulated WiFi router")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "ROUTER_HTTP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, short, env = "ROUTER_HTTP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "ROUTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn default_filter(&self) -> String {
        format!("{},router_server=debug,tower_http=debug", self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from(["router_server", "--host", "0.0.0.0", "-p", "9000"]);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert!(config.default_filter().starts_with("info,"));
    }
}
