//! Tool Execution
//!
//! Raw JSON arguments are decoded into a typed [`ToolCall`] and validated
//! before anything touches state. [`execute`] then applies the call, writing
//! exactly one log entry for every successful mutation.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::RouterError;
use crate::state::{iso_now, FrequencyBand, RouterState};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Speed test offsets, inclusive on both ends.
pub const DOWNLOAD_JITTER_MBPS: f64 = 5.0;
pub const UPLOAD_JITTER_MBPS: f64 = 3.0;
pub const LATENCY_JITTER_MS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ScanNetworks,
    GetRouterStatus,
    RebootRouter,
    ChangeWifiPassword,
    ChangeSsid,
    EnableGuestNetwork,
    DisconnectDevice,
    ChangeChannel,
    SetFrequencyBand,
    CheckFirmwareUpdate,
    RunSpeedTest,
}

impl ToolName {
    pub const ALL: [ToolName; 11] = [
        ToolName::ScanNetworks,
        ToolName::GetRouterStatus,
        ToolName::RebootRouter,
        ToolName::ChangeWifiPassword,
        ToolName::ChangeSsid,
        ToolName::EnableGuestNetwork,
        ToolName::DisconnectDevice,
        ToolName::ChangeChannel,
        ToolName::SetFrequencyBand,
        ToolName::CheckFirmwareUpdate,
        ToolName::RunSpeedTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ScanNetworks => "scan_networks",
            ToolName::GetRouterStatus => "get_router_status",
            ToolName::RebootRouter => "reboot_router",
            ToolName::ChangeWifiPassword => "change_wifi_password",
            ToolName::ChangeSsid => "change_ssid",
            ToolName::EnableGuestNetwork => "enable_guest_network",
            ToolName::DisconnectDevice => "disconnect_device",
            ToolName::ChangeChannel => "change_channel",
            ToolName::SetFrequencyBand => "set_frequency_band",
            ToolName::CheckFirmwareUpdate => "check_firmware_update",
            ToolName::RunSpeedTest => "run_speed_test",
        }
    }

    pub fn parse(name: &str) -> Result<Self, RouterError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| RouterError::not_found(format!("Unknown tool: {}", name)))
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::ScanNetworks => "Scan for available WiFi networks in range",
            ToolName::GetRouterStatus => {
                "Get current router status including connection info and system health"
            }
            ToolName::RebootRouter => "Reboot the WiFi router",
            ToolName::ChangeWifiPassword => "Change the WiFi network password",
            ToolName::ChangeSsid => "Change the WiFi network name (SSID)",
            ToolName::EnableGuestNetwork => "Enable or disable guest WiFi network",
            ToolName::DisconnectDevice => "Disconnect a specific device from the network",
            ToolName::ChangeChannel => "Change the WiFi channel",
            ToolName::SetFrequencyBand => "Set the WiFi frequency band",
            ToolName::CheckFirmwareUpdate => "Check for available firmware updates",
            ToolName::RunSpeedTest => "Run an internet speed test",
        }
    }

    pub fn input_schema(&self) -> Value {
        match self {
            ToolName::RebootRouter => json!({
                "type": "object",
                "properties": {
                    "confirm": {
                        "type": "boolean",
                        "description": "Confirm the reboot action"
                    }
                },
                "required": ["confirm"]
            }),
            ToolName::ChangeWifiPassword => json!({
                "type": "object",
                "properties": {
                    "new_password": {
                        "type": "string",
                        "description": "New WiFi password (minimum 8 characters)"
                    }
                },
                "required": ["new_password"]
            }),
            ToolName::ChangeSsid => json!({
                "type": "object",
                "properties": {
                    "new_ssid": {
                        "type": "string",
                        "description": "New WiFi network name"
                    }
                },
                "required": ["new_ssid"]
            }),
            ToolName::EnableGuestNetwork => json!({
                "type": "object",
                "properties": {
                    "enabled": {
                        "type": "boolean",
                        "description": "Enable (true) or disable (false) guest network"
                    },
                    "guest_ssid": {
                        "type": "string",
                        "description": "Guest network SSID (optional, only if enabling)"
                    },
                    "guest_password": {
                        "type": "string",
                        "description": "Guest network password (optional, only if enabling)"
                    }
                },
                "required": ["enabled"]
            }),
            ToolName::DisconnectDevice => json!({
                "type": "object",
                "properties": {
                    "mac_address": {
                        "type": "string",
                        "description": "MAC address of the device to disconnect"
                    }
                },
                "required": ["mac_address"]
            }),
            ToolName::ChangeChannel => json!({
                "type": "object",
                "properties": {
                    "channel": {
                        "type": "integer",
                        "description": "WiFi channel number (1-11 for 2.4GHz, 36-165 for 5GHz)"
                    }
                },
                "required": ["channel"]
            }),
            ToolName::SetFrequencyBand => json!({
                "type": "object",
                "properties": {
                    "band": {
                        "type": "string",
                        "enum": ["2.4GHz", "5GHz", "dual"],
                        "description": "Frequency band to use"
                    }
                },
                "required": ["band"]
            }),
            ToolName::ScanNetworks
            | ToolName::GetRouterStatus
            | ToolName::CheckFirmwareUpdate
            | ToolName::RunSpeedTest => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.as_str().into(),
            description: self.description().into(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool definition as advertised to clients
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn list() -> Vec<ToolDescriptor> {
    ToolName::ALL.iter().map(ToolName::descriptor).collect()
}

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    ScanNetworks,
    GetRouterStatus,
    RebootRouter {
        confirm: bool,
    },
    ChangeWifiPassword {
        new_password: String,
    },
    ChangeSsid {
        new_ssid: String,
    },
    EnableGuestNetwork {
        enabled: bool,
        guest_ssid: Option<String>,
        guest_password: Option<String>,
    },
    DisconnectDevice {
        mac_address: String,
    },
    ChangeChannel {
        channel: i64,
    },
    SetFrequencyBand {
        band: FrequencyBand,
    },
    CheckFirmwareUpdate,
    RunSpeedTest,
}

// ── Wire argument shapes ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RebootArgs {
    #[serde(default)]
    confirm: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PasswordArgs {
    #[serde(default)]
    new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SsidArgs {
    #[serde(default)]
    new_ssid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GuestNetworkArgs {
    enabled: bool,
    #[serde(default)]
    guest_ssid: Option<String>,
    #[serde(default)]
    guest_password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisconnectArgs {
    #[serde(default)]
    mac_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelArgs {
    #[serde(default)]
    channel: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct BandArgs {
    #[serde(default)]
    band: Option<String>,
}

fn decode<T: DeserializeOwned>(tool: ToolName, args: Value) -> Result<T, RouterError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| {
        RouterError::validation(format!("Invalid arguments for {}: {}", tool.as_str(), e))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ToolCall {
    /// Decode and validate `args` for the tool called `name`.
    pub fn parse(name: &str, args: Value) -> Result<Self, RouterError> {
        let tool = ToolName::parse(name)?;
        match tool {
            ToolName::ScanNetworks => Ok(ToolCall::ScanNetworks),
            ToolName::GetRouterStatus => Ok(ToolCall::GetRouterStatus),
            ToolName::CheckFirmwareUpdate => Ok(ToolCall::CheckFirmwareUpdate),
            ToolName::RunSpeedTest => Ok(ToolCall::RunSpeedTest),
            ToolName::RebootRouter => {
                let a: RebootArgs = decode(tool, args)?;
                Ok(ToolCall::RebootRouter {
                    confirm: a.confirm.unwrap_or(false),
                })
            }
            ToolName::ChangeWifiPassword => {
                let a: PasswordArgs = decode(tool, args)?;
                let new_password = a.new_password.unwrap_or_default();
                if new_password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(RouterError::validation(format!(
                        "Password must be at least {} characters long",
                        MIN_PASSWORD_LEN
                    )));
                }
                Ok(ToolCall::ChangeWifiPassword { new_password })
            }
            ToolName::ChangeSsid => {
                let a: SsidArgs = decode(tool, args)?;
                let new_ssid = non_empty(a.new_ssid)
                    .ok_or_else(|| RouterError::validation("SSID cannot be empty"))?;
                Ok(ToolCall::ChangeSsid { new_ssid })
            }
            ToolName::EnableGuestNetwork => {
                let a: GuestNetworkArgs = decode(tool, args)?;
                Ok(ToolCall::EnableGuestNetwork {
                    enabled: a.enabled,
                    guest_ssid: non_empty(a.guest_ssid),
                    guest_password: non_empty(a.guest_password),
                })
            }
            ToolName::DisconnectDevice => {
                let a: DisconnectArgs = decode(tool, args)?;
                Ok(ToolCall::DisconnectDevice {
                    mac_address: a.mac_address.unwrap_or_default(),
                })
            }
            ToolName::ChangeChannel => {
                let a: ChannelArgs = decode(tool, args)?;
                // 0 is treated the same as absent.
                match a.channel {
                    Some(channel) if channel != 0 => Ok(ToolCall::ChangeChannel { channel }),
                    _ => Err(RouterError::validation("Channel number is required")),
                }
            }
            ToolName::SetFrequencyBand => {
                let a: BandArgs = decode(tool, args)?;
                let band = a
                    .band
                    .as_deref()
                    .and_then(|b| b.parse::<FrequencyBand>().ok())
                    .ok_or_else(|| {
                        RouterError::validation("Invalid band. Must be '2.4GHz', '5GHz', or 'dual'")
                    })?;
                Ok(ToolCall::SetFrequencyBand { band })
            }
        }
    }

    pub fn name(&self) -> ToolName {
        match self {
            ToolCall::ScanNetworks => ToolName::ScanNetworks,
            ToolCall::GetRouterStatus => ToolName::GetRouterStatus,
            ToolCall::RebootRouter { .. } => ToolName::RebootRouter,
            ToolCall::ChangeWifiPassword { .. } => ToolName::ChangeWifiPassword,
            ToolCall::ChangeSsid { .. } => ToolName::ChangeSsid,
            ToolCall::EnableGuestNetwork { .. } => ToolName::EnableGuestNetwork,
            ToolCall::DisconnectDevice { .. } => ToolName::DisconnectDevice,
            ToolCall::ChangeChannel { .. } => ToolName::ChangeChannel,
            ToolCall::SetFrequencyBand { .. } => ToolName::SetFrequencyBand,
            ToolCall::CheckFirmwareUpdate => ToolName::CheckFirmwareUpdate,
            ToolCall::RunSpeedTest => ToolName::RunSpeedTest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
    Cancelled,
}

/// Structured tool result: `status`, `message`, plus tool-specific fields.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    pub status: ToolStatus,
    pub message: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToolStatus::Success, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ToolStatus::Cancelled, message)
    }

    /// Error outcome carrying the failure's message.
    pub fn failed(err: &RouterError) -> Self {
        Self::new(ToolStatus::Error, err.to_string())
    }

    fn new(status: ToolStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        self.data
            .insert(key.to_string(), serde_json::to_value(value).unwrap_or(Value::Null));
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Apply `call` to `state`. Errors leave state untouched.
pub fn execute(state: &mut RouterState, call: ToolCall) -> Result<ToolOutcome, RouterError> {
    execute_with_rng(state, call, &mut rand::thread_rng())
}

pub fn execute_with_rng<R: Rng>(
    state: &mut RouterState,
    call: ToolCall,
    rng: &mut R,
) -> Result<ToolOutcome, RouterError> {
    match call {
        ToolCall::ScanNetworks => Ok(scan_networks(state)),
        ToolCall::GetRouterStatus => Ok(router_status(state)),
        ToolCall::RebootRouter { confirm } => Ok(reboot(state, confirm)),
        ToolCall::ChangeWifiPassword { new_password } => {
            let len = new_password.chars().count();
            state.password = new_password;
            state.record("WiFi password changed");
            Ok(ToolOutcome::success(
                "WiFi password updated successfully. All devices will need to reconnect.",
            )
            .with("new_password_length", len))
        }
        ToolCall::ChangeSsid { new_ssid } => {
            let old_ssid = std::mem::replace(&mut state.ssid, new_ssid.clone());
            let change = format!("SSID changed from '{}' to '{}'", old_ssid, new_ssid);
            state.record(&change);
            Ok(ToolOutcome::success(format!(
                "{}. All devices will need to reconnect.",
                change
            ))
            .with("new_ssid", new_ssid))
        }
        ToolCall::EnableGuestNetwork {
            enabled,
            guest_ssid,
            guest_password,
        } => Ok(set_guest_network(state, enabled, guest_ssid, guest_password)),
        ToolCall::DisconnectDevice { mac_address } => {
            let device = state.remove_device(&mac_address).ok_or_else(|| {
                RouterError::not_found(format!(
                    "Device with MAC address {} not found",
                    mac_address
                ))
            })?;
            state.record(format!(
                "Device disconnected: {} ({})",
                device.name, mac_address
            ));
            Ok(ToolOutcome::success(format!(
                "Device '{}' disconnected successfully",
                device.name
            ))
            .with("device", device))
        }
        ToolCall::ChangeChannel { channel } => {
            let old_channel = std::mem::replace(&mut state.channel, channel);
            let change = format!("Channel changed from {} to {}", old_channel, channel);
            state.record(&change);
            Ok(ToolOutcome::success(change).with("new_channel", channel))
        }
        ToolCall::SetFrequencyBand { band } => {
            let old_band = std::mem::replace(&mut state.frequency_band, band);
            let change = format!("Frequency band changed from {} to {}", old_band, band);
            state.record(&change);
            Ok(ToolOutcome::success(change).with("new_band", band))
        }
        ToolCall::CheckFirmwareUpdate => {
            let outcome = ToolOutcome::success("Your router firmware is up to date")
                .with("current_version", &state.firmware_version)
                .with("latest_version", &state.firmware_version)
                .with("update_available", false)
                .with("checked_at", iso_now());
            state.record("Firmware update check: Up to date");
            Ok(outcome)
        }
        ToolCall::RunSpeedTest => Ok(speed_test(state, rng)),
    }
}

fn scan_networks(state: &RouterState) -> ToolOutcome {
    let count = state.available_networks.len();
    ToolOutcome::success(format!("Found {} networks", count))
        .with("networks_found", count)
        .with("networks", &state.available_networks)
        .with("timestamp", iso_now())
}

fn router_status(state: &RouterState) -> ToolOutcome {
    ToolOutcome::success("Router is online")
        .with("router_status", "online")
        .with("ssid", &state.ssid)
        .with("is_on", state.is_on)
        .with("frequency_band", state.frequency_band)
        .with("channel", state.channel)
        .with("security_mode", &state.security_mode)
        .with("connected_devices", state.device_count())
        .with("firmware_version", &state.firmware_version)
        .with("uptime", state.uptime_readable())
        .with("guest_network", state.guest_status())
}

fn reboot(state: &mut RouterState, confirm: bool) -> ToolOutcome {
    if !confirm {
        return ToolOutcome::cancelled("Reboot cancelled. Set confirm=true to proceed.");
    }
    state.uptime_seconds = 0;
    state.record("Router rebooted");
    ToolOutcome::success("Router is rebooting. This will take approximately 2 minutes.")
        .with("timestamp", iso_now())
}

fn set_guest_network(
    state: &mut RouterState,
    enabled: bool,
    guest_ssid: Option<String>,
    guest_password: Option<String>,
) -> ToolOutcome {
    state.guest_network_enabled = enabled;
    if !enabled {
        state.record("Guest network disabled");
        return ToolOutcome::success("Guest network disabled");
    }

    if let Some(ssid) = guest_ssid {
        state.guest_ssid = ssid;
    }
    if let Some(password) = guest_password {
        state.guest_password = password;
    }
    state.record(format!("Guest network enabled: {}", state.guest_ssid));
    ToolOutcome::success("Guest network enabled")
        .with("guest_ssid", &state.guest_ssid)
        .with("guest_password_set", true)
        .with(
            "note",
            "Password has been set but is not displayed for security. \
             Check router configuration to view masked password.",
        )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn speed_test<R: Rng>(state: &mut RouterState, rng: &mut R) -> ToolOutcome {
    let baseline = &state.network_stats;
    let download = round2(
        baseline.download_speed_mbps + rng.gen_range(-DOWNLOAD_JITTER_MBPS..=DOWNLOAD_JITTER_MBPS),
    );
    let upload = round2(
        baseline.upload_speed_mbps + rng.gen_range(-UPLOAD_JITTER_MBPS..=UPLOAD_JITTER_MBPS),
    );
    let latency = baseline.latency_ms + rng.gen_range(-LATENCY_JITTER_MS..=LATENCY_JITTER_MS);
    let jitter: i64 = rng.gen_range(1..=5);

    state.record(format!(
        "Speed test completed: {} Mbps down, {} Mbps up",
        download, upload
    ));
    ToolOutcome::success("Speed test completed")
        .with("download_mbps", download)
        .with("upload_mbps", upload)
        .with("latency_ms", latency)
        .with("jitter_ms", jitter)
        .with("tested_at", iso_now())
}
