//! Router State
//!
//! The single mutable record behind every resource, tool, and prompt.
//! Constructed once by the owning process and handed to dispatch by reference.

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Shown in place of any stored password.
pub const PASSWORD_MASK: &str = "********";

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Radio band the router broadcasts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyBand {
    #[serde(rename = "2.4GHz")]
    Band2_4,
    #[serde(rename = "5GHz")]
    Band5,
    #[serde(rename = "dual")]
    Dual,
}

impl FrequencyBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyBand::Band2_4 => "2.4GHz",
            FrequencyBand::Band5 => "5GHz",
            FrequencyBand::Dual => "dual",
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing FrequencyBand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBandError(String);

impl fmt::Display for ParseBandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency band '{}'", self.0)
    }
}

impl std::error::Error for ParseBandError {}

impl FromStr for FrequencyBand {
    type Err = ParseBandError;

    // Case-sensitive: the wire values are fixed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2.4GHz" => Ok(FrequencyBand::Band2_4),
            "5GHz" => Ok(FrequencyBand::Band5),
            "dual" => Ok(FrequencyBand::Dual),
            other => Err(ParseBandError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub mac: String,
    pub ip: String,
    pub connected_time: String,
    pub signal_strength: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedNetwork {
    pub ssid: String,
    pub signal_strength: i32,
    pub security: String,
    pub frequency: String,
    pub channel: i64,
}

/// Baseline performance counters. Speed tests jitter around these
/// without writing back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub download_speed_mbps: f64,
    pub upload_speed_mbps: f64,
    pub latency_ms: i64,
    pub packet_loss_percent: f64,
    pub connected_devices: usize,
}

#[derive(Debug, Clone)]
pub struct RouterState {
    pub ssid: String,
    pub password: String,
    pub is_on: bool,
    pub frequency_band: FrequencyBand,
    pub channel: i64,
    pub max_devices: u32,
    pub security_mode: String,
    pub guest_network_enabled: bool,
    pub guest_ssid: String,
    pub guest_password: String,
    pub firmware_version: String,
    pub uptime_seconds: u64,
    /// Connection order. MAC is the unique key.
    pub connected_devices: Vec<Device>,
    pub available_networks: Vec<ScannedNetwork>,
    pub network_stats: NetworkStats,
    /// Newest first.
    pub logs: Vec<String>,
}

impl RouterState {
    /// Prepend a timestamped entry to the audit log.
    pub fn record(&mut self, event: impl AsRef<str>) {
        let entry = format!("[{}] {}", log_timestamp(), event.as_ref());
        self.logs.insert(0, entry);
    }

    pub fn device_count(&self) -> usize {
        self.connected_devices.len()
    }

    pub fn find_device(&self, mac: &str) -> Option<&Device> {
        self.connected_devices.iter().find(|d| d.mac == mac)
    }

    /// Remove the device with `mac`. `network_stats` is a baseline and is
    /// left as is.
    pub fn remove_device(&mut self, mac: &str) -> Option<Device> {
        let idx = self.connected_devices.iter().position(|d| d.mac == mac)?;
        Some(self.connected_devices.remove(idx))
    }

    pub fn uptime_days(&self) -> u64 {
        self.uptime_seconds / SECONDS_PER_DAY
    }

    /// `"<days> days, <hours> hours"`
    pub fn uptime_readable(&self) -> String {
        let hours = (self.uptime_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        format!("{} days, {} hours", self.uptime_days(), hours)
    }

    pub fn guest_status(&self) -> &'static str {
        if self.guest_network_enabled {
            "enabled"
        } else {
            "disabled"
        }
    }
}

impl Default for RouterState {
    /// The factory configuration the simulator boots with.
    fn default() -> Self {
        let connected_devices = vec![
            device("iPhone 14", "AA:BB:CC:DD:EE:01", "192.168.1.101", "2 hours", -45),
            device("MacBook Pro", "AA:BB:CC:DD:EE:02", "192.168.1.102", "5 hours", -38),
            device("Smart TV", "AA:BB:CC:DD:EE:03", "192.168.1.103", "5 days", -55),
        ];
        let available_networks = vec![
            network("XiaoYi_Home_WiFi", -30, "WPA3", "2.4GHz", 6),
            network("Neighbor_WiFi", -65, "WPA2", "2.4GHz", 11),
            network("CoffeeShop_Free", -70, "Open", "2.4GHz", 1),
            network("Office_Network", -80, "WPA2", "5GHz", 36),
        ];
        let network_stats = NetworkStats {
            download_speed_mbps: 95.5,
            upload_speed_mbps: 48.2,
            latency_ms: 12,
            packet_loss_percent: 0.1,
            connected_devices: connected_devices.len(),
        };

        let mut state = Self {
            ssid: "XiaoYi_Home_WiFi".into(),
            password: "secure_password_123".into(),
            is_on: true,
            frequency_band: FrequencyBand::Band2_4,
            channel: 6,
            max_devices: 32,
            security_mode: "WPA3".into(),
            guest_network_enabled: false,
            guest_ssid: "XiaoYi_Guest".into(),
            guest_password: "guest123".into(),
            firmware_version: "v2.1.4".into(),
            uptime_seconds: 5 * SECONDS_PER_DAY,
            connected_devices,
            available_networks,
            network_stats,
            logs: Vec::new(),
        };

        let boot_events = [
            "Router system started".to_string(),
            format!("Firmware updated to {}", state.firmware_version),
            "Guest network disabled".to_string(),
            format!("Channel set to {}", state.channel),
            format!("Security mode set to {}", state.security_mode),
        ];
        let stamp = log_timestamp();
        state.logs = boot_events
            .iter()
            .map(|event| format!("[{}] {}", stamp, event))
            .collect();
        state
    }
}

fn device(name: &str, mac: &str, ip: &str, connected_time: &str, signal: i32) -> Device {
    Device {
        name: name.into(),
        mac: mac.into(),
        ip: ip.into(),
        connected_time: connected_time.into(),
        signal_strength: signal,
    }
}

fn network(ssid: &str, signal: i32, security: &str, frequency: &str, channel: i64) -> ScannedNetwork {
    ScannedNetwork {
        ssid: ssid.into(),
        signal_strength: signal,
        security: security.into(),
        frequency: frequency.into(),
        channel,
    }
}

fn log_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// ISO-8601 local timestamp for tool results.
pub(crate) fn iso_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_factory_config() {
        let state = RouterState::default();
        assert_eq!(state.ssid, "XiaoYi_Home_WiFi");
        assert_eq!(state.frequency_band, FrequencyBand::Band2_4);
        assert_eq!(state.channel, 6);
        assert_eq!(state.device_count(), 3);
        assert_eq!(state.available_networks.len(), 4);
        assert_eq!(state.network_stats.connected_devices, 3);
        assert_eq!(state.logs.len(), 5);
        assert!(state.logs[0].ends_with("Router system started"));
    }

    #[test]
    fn default_state_has_unique_macs() {
        let state = RouterState::default();
        let mut macs: Vec<_> = state.connected_devices.iter().map(|d| &d.mac).collect();
        macs.sort();
        macs.dedup();
        assert_eq!(macs.len(), state.device_count());
    }

    #[test]
    fn record_prepends_timestamped_entry() {
        let mut state = RouterState::default();
        let before = state.logs.len();
        state.record("Something happened");
        assert_eq!(state.logs.len(), before + 1);
        assert!(state.logs[0].starts_with('['));
        assert!(state.logs[0].ends_with("] Something happened"));
    }

    #[test]
    fn uptime_readable_splits_days_and_hours() {
        let mut state = RouterState::default();
        assert_eq!(state.uptime_readable(), "5 days, 0 hours");
        state.uptime_seconds = 86_400 + 7_200 + 59;
        assert_eq!(state.uptime_readable(), "1 days, 2 hours");
        state.uptime_seconds = 0;
        assert_eq!(state.uptime_readable(), "0 days, 0 hours");
    }

    #[test]
    fn remove_device_leaves_stats_baseline() {
        let mut state = RouterState::default();
        let stats = state.network_stats.clone();
        let removed = state.remove_device("AA:BB:CC:DD:EE:02").unwrap();
        assert_eq!(removed.name, "MacBook Pro");
        assert_eq!(state.device_count(), 2);
        assert_eq!(state.network_stats, stats);
        assert!(state.remove_device("AA:BB:CC:DD:EE:02").is_none());
    }

    #[test]
    fn frequency_band_parse_is_case_sensitive() {
        assert_eq!("5GHz".parse::<FrequencyBand>(), Ok(FrequencyBand::Band5));
        assert_eq!("dual".parse::<FrequencyBand>(), Ok(FrequencyBand::Dual));
        assert!("5ghz".parse::<FrequencyBand>().is_err());
        assert!("6GHz".parse::<FrequencyBand>().is_err());
    }

    #[test]
    fn frequency_band_serializes_as_wire_value() {
        let json = serde_json::to_value(FrequencyBand::Band2_4).unwrap();
        assert_eq!(json, "2.4GHz");
    }
}
