//! Resource Reads
//!
//! Five fixed `router://` URIs, each a pure projection of [`RouterState`].

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::RouterError;
use crate::state::{RouterState, PASSWORD_MASK};

pub const URI_SCHEME: &str = "router://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceId {
    Devices,
    Stats,
    Config,
    Logs,
    Networks,
}

impl ResourceId {
    pub const ALL: [ResourceId; 5] = [
        ResourceId::Devices,
        ResourceId::Stats,
        ResourceId::Config,
        ResourceId::Logs,
        ResourceId::Networks,
    ];

    /// Short identifier, the part after `router://`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceId::Devices => "devices",
            ResourceId::Stats => "stats",
            ResourceId::Config => "config",
            ResourceId::Logs => "logs",
            ResourceId::Networks => "networks",
        }
    }

    pub fn uri(&self) -> String {
        format!("{}{}", URI_SCHEME, self.as_str())
    }

    /// Exact, case-sensitive URI match.
    pub fn from_uri(uri: &str) -> Result<Self, RouterError> {
        uri.strip_prefix(URI_SCHEME)
            .and_then(|rest| Self::ALL.into_iter().find(|id| id.as_str() == rest))
            .ok_or_else(|| RouterError::not_found(format!("Unknown resource URI: {}", uri)))
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ResourceId::Logs => "text/plain",
            _ => "application/json",
        }
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        let (name, description) = match self {
            ResourceId::Devices => (
                "Connected Devices",
                "List of all devices currently connected to the router",
            ),
            ResourceId::Stats => (
                "Network Statistics",
                "Current network performance statistics and metrics",
            ),
            ResourceId::Config => (
                "Router Configuration",
                "Current router configuration including SSID, security, and settings",
            ),
            ResourceId::Logs => ("Router Logs", "Recent router activity logs and events"),
            ResourceId::Networks => (
                "Available Networks",
                "List of WiFi networks detected by the router",
            ),
        };
        ResourceDescriptor {
            uri: self.uri(),
            name: name.into(),
            mime_type: self.mime_type().into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub description: String,
}

/// A resource body: JSON for structured reads, plain text for logs.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceContent {
    Json(Value),
    Text(String),
}

impl ResourceContent {
    /// Text form: pretty JSON or the raw string.
    pub fn to_text(&self) -> String {
        match self {
            ResourceContent::Json(v) => serde_json::to_string_pretty(v).unwrap_or_default(),
            ResourceContent::Text(s) => s.clone(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResourceContent::Json(v) => v,
            ResourceContent::Text(s) => Value::String(s),
        }
    }
}

pub fn list() -> Vec<ResourceDescriptor> {
    ResourceId::ALL.iter().map(ResourceId::descriptor).collect()
}

pub fn read(state: &RouterState, id: ResourceId) -> Result<ResourceContent, RouterError> {
    let content = match id {
        ResourceId::Devices => ResourceContent::Json(json!({
            "connected_devices": to_json("connected devices", &state.connected_devices)?,
            "total_devices": state.device_count(),
            "max_devices": state.max_devices,
        })),
        ResourceId::Stats => ResourceContent::Json(to_json("network stats", &state.network_stats)?),
        ResourceId::Config => ResourceContent::Json(config_view(state)),
        ResourceId::Logs => ResourceContent::Text(state.logs.join("\n")),
        ResourceId::Networks => ResourceContent::Json(json!({
            "available_networks": to_json("available networks", &state.available_networks)?,
            "total_networks": state.available_networks.len(),
        })),
    };
    Ok(content)
}

fn to_json<T: Serialize>(what: &str, value: &T) -> Result<Value, RouterError> {
    let value = serde_json::to_value(value).with_context(|| format!("serializing {what}"))?;
    Ok(value)
}

fn config_view(state: &RouterState) -> Value {
    let (guest_ssid, guest_password) = if state.guest_network_enabled {
        (Some(state.guest_ssid.as_str()), Some(PASSWORD_MASK))
    } else {
        (None, None)
    };
    json!({
        "ssid": state.ssid,
        "password": PASSWORD_MASK,
        "is_on": state.is_on,
        "frequency_band": state.frequency_band,
        "channel": state.channel,
        "security_mode": state.security_mode,
        "guest_network_enabled": state.guest_network_enabled,
        "guest_ssid": guest_ssid,
        "guest_password": guest_password,
        "firmware_version": state.firmware_version,
        "uptime_seconds": state.uptime_seconds,
        "uptime_readable": state.uptime_readable(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_ok(state: &RouterState, id: ResourceId) -> ResourceContent {
        read(state, id).expect("resource projection serializes")
    }

    fn json_of(content: ResourceContent) -> Value {
        match content {
            ResourceContent::Json(v) => v,
            ResourceContent::Text(t) => panic!("expected JSON, got text: {t}"),
        }
    }

    #[test]
    fn from_uri_accepts_all_fixed_uris() {
        for id in ResourceId::ALL {
            assert_eq!(ResourceId::from_uri(&id.uri()).unwrap(), id);
        }
    }

    #[test]
    fn from_uri_rejects_unknown_and_wrong_case() {
        for uri in ["router://bogus", "router://Devices", "devices", "http://devices", ""] {
            let err = ResourceId::from_uri(uri).unwrap_err();
            assert!(matches!(err, RouterError::NotFound(_)), "{uri}");
        }
        let err = ResourceId::from_uri("router://bogus").unwrap_err();
        assert_eq!(err.to_string(), "Unknown resource URI: router://bogus");
    }

    #[test]
    fn list_preserves_catalog_order() {
        let uris: Vec<_> = list().into_iter().map(|d| d.uri).collect();
        assert_eq!(
            uris,
            vec![
                "router://devices",
                "router://stats",
                "router://config",
                "router://logs",
                "router://networks"
            ]
        );
        assert_eq!(ResourceId::Logs.descriptor().mime_type, "text/plain");
    }

    #[test]
    fn config_masks_passwords() {
        let mut state = RouterState::default();
        state.password = "hunter2hunter2".into();
        state.guest_network_enabled = true;
        state.guest_password = "guestsecret".into();

        let config = json_of(read_ok(&state, ResourceId::Config));
        assert_eq!(config["password"], PASSWORD_MASK);
        assert_eq!(config["guest_password"], PASSWORD_MASK);

        let rendered = config.to_string();
        assert!(!rendered.contains("hunter2hunter2"));
        assert!(!rendered.contains("guestsecret"));
    }

    #[test]
    fn config_nulls_guest_fields_when_disabled() {
        let state = RouterState::default();
        let config = json_of(read_ok(&state, ResourceId::Config));
        assert!(config["guest_ssid"].is_null());
        assert!(config["guest_password"].is_null());
        assert_eq!(config["uptime_readable"], "5 days, 0 hours");
        assert_eq!(config["frequency_band"], "2.4GHz");
    }

    #[test]
    fn devices_includes_counts() {
        let state = RouterState::default();
        let devices = json_of(read_ok(&state, ResourceId::Devices));
        assert_eq!(devices["total_devices"], 3);
        assert_eq!(devices["max_devices"], 32);
        assert_eq!(devices["connected_devices"][0]["mac"], "AA:BB:CC:DD:EE:01");
    }

    #[test]
    fn logs_are_newline_joined_text() {
        let mut state = RouterState::default();
        state.record("latest");
        match read_ok(&state, ResourceId::Logs) {
            ResourceContent::Text(text) => {
                let first = text.lines().next().unwrap();
                assert!(first.ends_with("latest"));
                assert_eq!(text.lines().count(), state.logs.len());
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn stats_and_networks_project_state() {
        let state = RouterState::default();
        let stats = json_of(read_ok(&state, ResourceId::Stats));
        assert_eq!(stats["download_speed_mbps"], 95.5);
        assert_eq!(stats["latency_ms"], 12);

        let networks = json_of(read_ok(&state, ResourceId::Networks));
        assert_eq!(networks["total_networks"], 4);
        assert_eq!(networks["available_networks"][3]["channel"], 36);
    }

    #[test]
    fn serialization_failure_is_internal() {
        let mut tuple_keyed = std::collections::HashMap::new();
        tuple_keyed.insert((1u8, 2u8), 3u8);
        let err = to_json("tuple map", &tuple_keyed).unwrap_err();
        assert!(matches!(err, RouterError::Internal(_)));
        assert_eq!(err.http_status(), 500);
        assert!(err.to_string().contains("serializing tuple map"));
    }
}
