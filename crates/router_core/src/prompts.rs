//! Prompt Builders
//!
//! Each prompt renders current [`RouterState`] into a single user message of
//! guidance text. Nothing here mutates state.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::RouterError;
use crate::state::RouterState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptName {
    TroubleshootConnection,
    SetupGuestNetwork,
    OptimizePerformance,
    SecurityAudit,
    ParentalControls,
}

impl PromptName {
    pub const ALL: [PromptName; 5] = [
        PromptName::TroubleshootConnection,
        PromptName::SetupGuestNetwork,
        PromptName::OptimizePerformance,
        PromptName::SecurityAudit,
        PromptName::ParentalControls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptName::TroubleshootConnection => "troubleshoot_connection",
            PromptName::SetupGuestNetwork => "setup_guest_network",
            PromptName::OptimizePerformance => "optimize_performance",
            PromptName::SecurityAudit => "security_audit",
            PromptName::ParentalControls => "parental_controls",
        }
    }

    pub fn parse(name: &str) -> Result<Self, RouterError> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| RouterError::not_found(format!("Unknown prompt: {}", name)))
    }

    pub fn descriptor(&self) -> PromptDescriptor {
        let (description, arguments) = match self {
            PromptName::TroubleshootConnection => (
                "Get help troubleshooting WiFi connection issues",
                vec![PromptArgument {
                    name: "issue_type".into(),
                    description: "Type of issue: slow_speed, no_connection, intermittent, \
                                  or device_cant_connect"
                        .into(),
                    required: true,
                }],
            ),
            PromptName::SetupGuestNetwork => {
                ("Guide for setting up a guest WiFi network", Vec::new())
            }
            PromptName::OptimizePerformance => (
                "Get recommendations for optimizing router performance",
                Vec::new(),
            ),
            PromptName::SecurityAudit => (
                "Perform a security audit and get recommendations",
                Vec::new(),
            ),
            PromptName::ParentalControls => (
                "Guide for setting up parental controls and device restrictions",
                Vec::new(),
            ),
        };
        PromptDescriptor {
            name: self.as_str().into(),
            description: description.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

pub fn list() -> Vec<PromptDescriptor> {
    PromptName::ALL.iter().map(PromptName::descriptor).collect()
}

/// Troubleshooting template selector. Anything unrecognised gets
/// [`IssueType::NoConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    SlowSpeed,
    NoConnection,
    Intermittent,
    DeviceCantConnect,
}

impl IssueType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "slow_speed" => IssueType::SlowSpeed,
            "intermittent" => IssueType::Intermittent,
            "device_cant_connect" => IssueType::DeviceCantConnect,
            _ => IssueType::NoConnection,
        }
    }
}

/// A validated prompt invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptRequest {
    TroubleshootConnection {
        /// As requested, used verbatim in the description.
        issue_type: String,
    },
    SetupGuestNetwork,
    OptimizePerformance,
    SecurityAudit,
    ParentalControls,
}

impl PromptRequest {
    pub fn parse(name: &str, args: Option<&HashMap<String, String>>) -> Result<Self, RouterError> {
        Ok(match PromptName::parse(name)? {
            PromptName::TroubleshootConnection => PromptRequest::TroubleshootConnection {
                issue_type: args
                    .and_then(|a| a.get("issue_type"))
                    .cloned()
                    .unwrap_or_else(|| "no_connection".to_string()),
            },
            PromptName::SetupGuestNetwork => PromptRequest::SetupGuestNetwork,
            PromptName::OptimizePerformance => PromptRequest::OptimizePerformance,
            PromptName::SecurityAudit => PromptRequest::SecurityAudit,
            PromptName::ParentalControls => PromptRequest::ParentalControls,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptResult {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: PromptContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl PromptResult {
    fn user(description: impl Into<String>, text: String) -> Self {
        Self {
            description: description.into(),
            messages: vec![PromptMessage {
                role: "user".into(),
                content: PromptContent {
                    content_type: "text".into(),
                    text,
                },
            }],
        }
    }

    /// Text of the first message, if any.
    pub fn text(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.text.as_str())
    }
}

pub fn render(state: &RouterState, request: &PromptRequest) -> PromptResult {
    match request {
        PromptRequest::TroubleshootConnection { issue_type } => PromptResult::user(
            format!("Troubleshooting guide for {}", issue_type.replace('_', " ")),
            troubleshoot(state, IssueType::from_name(issue_type)),
        ),
        PromptRequest::SetupGuestNetwork => {
            PromptResult::user("Guide for setting up guest network", guest_setup(state))
        }
        PromptRequest::OptimizePerformance => {
            PromptResult::user("Router performance optimization guide", optimize(state))
        }
        PromptRequest::SecurityAudit => PromptResult::user(
            "Security audit report with recommendations",
            security_report(state, &security_audit(state)),
        ),
        PromptRequest::ParentalControls => {
            PromptResult::user("Guide for setting up parental controls", parental(state))
        }
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn troubleshoot(state: &RouterState, issue: IssueType) -> String {
    let devices = state.device_count();
    match issue {
        IssueType::SlowSpeed => format!(
            "## Troubleshooting Slow WiFi Speed

Current router status:
- SSID: {ssid}
- Channel: {channel}
- Frequency: {frequency}
- Connected devices: {devices}

### Recommended Actions:
1. Check if too many devices are connected (current: {devices})
2. Consider switching to 5GHz band for better speed
3. Change channel if there's interference (use scan_networks tool)
4. Run a speed test to measure actual performance
5. Check if any device is consuming excessive bandwidth

### Commands to try:
- Use `run_speed_test` to measure current speed
- Use `scan_networks` to find less crowded channels
- Use `set_frequency_band` to switch to 5GHz if supported
- Use `change_channel` to switch to a less congested channel
",
            ssid = state.ssid,
            channel = state.channel,
            frequency = state.frequency_band,
        ),
        IssueType::NoConnection => format!(
            "## Troubleshooting No Connection

Current router status:
- Router is: {power}
- SSID: {ssid}
- Security: {security}

### Recommended Actions:
1. Verify the router is powered on and all lights are normal
2. Check if the device can see the network (use scan_networks)
3. Verify you're using the correct password
4. Try rebooting the router
5. Check if the device's MAC address is blocked

### Commands to try:
- Use `get_router_status` to check router health
- Use `scan_networks` to verify network is visible
- Use `reboot_router` if other steps don't work
",
            power = if state.is_on { "ON" } else { "OFF" },
            ssid = state.ssid,
            security = state.security_mode,
        ),
        IssueType::Intermittent => format!(
            "## Troubleshooting Intermittent Connection

Current router status:
- Channel: {channel}
- Frequency: {frequency}
- Uptime: {uptime}

### Recommended Actions:
1. Check for channel interference from neighboring networks
2. Verify firmware is up to date
3. Check router logs for errors or patterns
4. Consider changing channel or frequency band
5. Check if router needs a reboot (high uptime: {uptime})

### Commands to try:
- Use `scan_networks` to check for interference
- Use `check_firmware_update` to ensure latest firmware
- Read `router://logs` resource to check for errors
- Use `change_channel` if interference is detected
- Use `reboot_router` if uptime is very high
",
            channel = state.channel,
            frequency = state.frequency_band,
            uptime = format!("{} days", state.uptime_days()),
        ),
        IssueType::DeviceCantConnect => format!(
            "## Troubleshooting Device Connection Issues

Current router status:
- Connected devices: {devices}/{max}
- Security mode: {security}
- Guest network: {guest}

### Recommended Actions:
1. Check if device limit is reached (current: {devices}/{max})
2. Verify device supports the security mode (WPA3 may not work on older devices)
3. Try forgetting and re-adding the network on the device
4. Check if MAC filtering is enabled
5. Try connecting to guest network to isolate the issue

### Commands to try:
- Use `get_router_status` to check device count
- Read `router://devices` resource to see connected devices
- Use `enable_guest_network` to create a test network
- Consider temporarily changing security mode if device is old
",
            max = state.max_devices,
            security = state.security_mode,
            guest = state.guest_status(),
        ),
    }
}

fn guest_setup(state: &RouterState) -> String {
    let guest_ssid = if state.guest_network_enabled {
        state.guest_ssid.as_str()
    } else {
        "Not set"
    };
    format!(
        "## Setting Up Guest WiFi Network

A guest network allows visitors to access the internet without accessing your main network and devices.

### Current Status:
- Main SSID: {ssid}
- Guest Network: {status}
- Guest SSID: {guest_ssid}

### Steps to Enable:
1. Choose a guest network name (SSID) - something like \"{ssid}_Guest\"
2. Set a strong but shareable password
3. Use the `enable_guest_network` tool with enabled=true

### Example Command:
```
enable_guest_network(
    enabled=true,
    guest_ssid=\"{suggested}\",
    guest_password=\"your_guest_password\"
)
```

### Security Best Practices:
- Use a different password than your main network
- Change the guest password regularly
- Share only with trusted visitors
- Consider disabling when not needed

### To Disable:
Use `enable_guest_network(enabled=false)`
",
        ssid = state.ssid,
        status = enabled_label(state.guest_network_enabled),
        suggested = state.guest_ssid,
    )
}

fn optimize(state: &RouterState) -> String {
    format!(
        "## Router Performance Optimization Guide

### Current Configuration:
- Frequency Band: {band}
- Channel: {channel}
- Connected Devices: {devices}
- Security Mode: {security}

### Optimization Recommendations:

#### 1. Choose the Right Frequency Band
- **2.4GHz**: Better range, more interference, slower speed
- **5GHz**: Shorter range, less interference, faster speed
- **Dual Band**: Best of both worlds

Current: {band}
Command: `set_frequency_band(band=\"5GHz\")` or `set_frequency_band(band=\"dual\")`

#### 2. Optimize Channel Selection
- Scan for neighboring networks: `scan_networks()`
- Find least congested channel
- Change channel: `change_channel(channel=X)`

Current channel: {channel}

#### 3. Device Management
- Disconnect unused devices: `disconnect_device(mac_address=\"XX:XX:XX:XX:XX:XX\")`
- Monitor device count: Currently {devices} devices

#### 4. Regular Maintenance
- Check for firmware updates: `check_firmware_update()`
- Reboot periodically if uptime is high (current: {days} days)
- Monitor logs: Read `router://logs` resource

#### 5. Monitor Performance
- Run regular speed tests: `run_speed_test()`
- Check network stats: Read `router://stats` resource

### Quick Actions:
1. Run `scan_networks()` to check interference
2. Run `run_speed_test()` to baseline performance
3. Run `check_firmware_update()` to ensure latest version
",
        band = state.frequency_band,
        channel = state.channel,
        devices = state.device_count(),
        security = state.security_mode,
        days = state.uptime_days(),
    )
}

/// Informational score out of 100. Not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityAudit {
    pub score: u32,
    /// Ordered by check: security mode, password length, SSID, guest network.
    pub recommendations: Vec<String>,
}

pub fn security_audit(state: &RouterState) -> SecurityAudit {
    let mut score = 0;
    let mut recommendations = Vec::new();

    match state.security_mode.as_str() {
        "WPA3" => score += 30,
        "WPA2" => {
            score += 20;
            recommendations.push("Consider upgrading to WPA3 for better security".to_string());
        }
        _ => {
            score += 5;
            recommendations.push("⚠️ CRITICAL: Upgrade to WPA3 immediately".to_string());
        }
    }

    match state.password.chars().count() {
        n if n >= 16 => score += 25,
        n if n >= 12 => score += 20,
        n if n >= 8 => {
            score += 10;
            recommendations.push("Use a longer password (16+ characters recommended)".to_string());
        }
        _ => recommendations.push("⚠️ CRITICAL: Password is too short".to_string()),
    }

    let ssid = state.ssid.to_lowercase();
    if ssid.contains("default") || ssid.contains("admin") {
        recommendations.push("Change default SSID to something unique".to_string());
    } else {
        score += 15;
    }

    if state.guest_network_enabled {
        score += 15;
        if state.guest_password != state.password {
            score += 15;
        } else {
            recommendations.push("Use a different password for guest network".to_string());
        }
    } else {
        recommendations.push("Consider enabling guest network for visitors".to_string());
    }

    recommendations.push(
        "Keep firmware updated - check regularly with `check_firmware_update()`".to_string(),
    );

    SecurityAudit {
        score,
        recommendations,
    }
}

fn security_report(state: &RouterState, audit: &SecurityAudit) -> String {
    let mut text = format!(
        "## Security Audit Report

### Overall Security Score: {score}/100

### Current Security Settings:
- Security Mode: {mode}
- Password Length: {len} characters
- SSID: {ssid}
- Guest Network: {guest}
- Firmware Version: {firmware}

### Recommendations:
",
        score = audit.score,
        mode = state.security_mode,
        len = state.password.chars().count(),
        ssid = state.ssid,
        guest = enabled_label(state.guest_network_enabled),
        firmware = state.firmware_version,
    );
    for (i, rec) in audit.recommendations.iter().enumerate() {
        let _ = writeln!(text, "{}. {}", i + 1, rec);
    }
    text.push_str(
        "
### Security Best Practices:
1. Use WPA3 security mode
2. Use a strong, unique password (16+ characters)
3. Change passwords regularly (every 3-6 months)
4. Enable guest network for visitors
5. Keep firmware updated
6. Monitor connected devices regularly
7. Disable WPS if available
8. Change default admin credentials

### Commands for Security:
- `change_wifi_password(new_password=\"your_strong_password\")`
- `enable_guest_network(enabled=true, guest_ssid=\"Guest\", guest_password=\"guest_pass\")`
- `check_firmware_update()`
- Read `router://devices` to monitor connected devices
- Read `router://logs` to check for suspicious activity
",
    );
    text
}

fn parental(state: &RouterState) -> String {
    let mut text = format!(
        "## Parental Controls Guide

Parental controls help you manage internet access for specific devices and set usage schedules.

### Current Status:
- Connected devices: {devices}
- Guest network: {guest}
",
        devices = state.device_count(),
        guest = enabled_label(state.guest_network_enabled),
    );
    if !state.connected_devices.is_empty() {
        text.push_str("\n### Connected Devices:\n");
        for device in &state.connected_devices {
            let _ = writeln!(text, "- {} ({}, {})", device.name, device.mac, device.ip);
        }
    }
    text.push_str(
        "
### Steps to Set Up Parental Controls:
1. Identify the device to restrict (use `router://devices`)
2. Disconnect the device when needed (use `disconnect_device`)
3. Enable guest network for kids with a separate password
4. Set device schedules (manual in this simulation)

### Example Commands:
- Read `router://devices`
- Use `disconnect_device(mac_address=\"XX:XX:XX:XX:XX:XX\")`
- Use `enable_guest_network(enabled=true, guest_ssid=\"Kids_WiFi\", guest_password=\"kids_pass\")`

### Best Practices:
- Communicate rules clearly
- Review logs regularly
- Update passwords periodically
",
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn render_named(state: &RouterState, name: &str, a: Option<&HashMap<String, String>>) -> PromptResult {
        render(state, &PromptRequest::parse(name, a).unwrap())
    }

    #[test]
    fn catalog_has_five_prompts() {
        let prompts = list();
        assert_eq!(prompts.len(), 5);
        assert_eq!(prompts[0].arguments.len(), 1);
        assert!(prompts[0].arguments[0].required);
        assert!(prompts[1..].iter().all(|p| p.arguments.is_empty()));
    }

    #[test]
    fn unknown_prompt_is_not_found() {
        let err = PromptRequest::parse("nope", None).unwrap_err();
        assert!(matches!(err, RouterError::NotFound(_)));
    }

    #[test]
    fn troubleshoot_selects_template_and_interpolates() {
        let state = RouterState::default();
        let a = args(&[("issue_type", "slow_speed")]);
        let result = render_named(&state, "troubleshoot_connection", Some(&a));
        assert_eq!(result.description, "Troubleshooting guide for slow speed");
        let text = result.text().unwrap();
        assert!(text.contains("Troubleshooting Slow WiFi Speed"));
        assert!(text.contains("- Channel: 6"));
        assert!(text.contains("- Frequency: 2.4GHz"));
        assert!(text.contains("(current: 3)"));
    }

    #[test]
    fn troubleshoot_device_template_shows_limits() {
        let state = RouterState::default();
        let a = args(&[("issue_type", "device_cant_connect")]);
        let text = render_named(&state, "troubleshoot_connection", Some(&a))
            .text()
            .unwrap()
            .to_string();
        assert!(text.contains("Connected devices: 3/32"));
        assert!(text.contains("Guest network: disabled"));
    }

    #[test]
    fn troubleshoot_unknown_issue_falls_back_to_no_connection() {
        let state = RouterState::default();
        let a = args(&[("issue_type", "gremlins")]);
        let result = render_named(&state, "troubleshoot_connection", Some(&a));
        assert_eq!(result.description, "Troubleshooting guide for gremlins");
        assert!(result.text().unwrap().contains("Troubleshooting No Connection"));
        assert!(result.text().unwrap().contains("Router is: ON"));

        let result = render_named(&state, "troubleshoot_connection", None);
        assert_eq!(result.description, "Troubleshooting guide for no connection");
    }

    #[test]
    fn intermittent_reports_uptime_in_days() {
        let state = RouterState::default();
        let a = args(&[("issue_type", "intermittent")]);
        let result = render_named(&state, "troubleshoot_connection", Some(&a));
        assert!(result.text().unwrap().contains("high uptime: 5 days"));
    }

    #[test]
    fn every_prompt_yields_one_user_message() {
        let state = RouterState::default();
        for prompt in PromptName::ALL {
            let result = render_named(&state, prompt.as_str(), None);
            assert_eq!(result.messages.len(), 1);
            assert_eq!(result.messages[0].role, "user");
            assert_eq!(result.messages[0].content.content_type, "text");
        }
    }

    #[test]
    fn guest_setup_reflects_status() {
        let mut state = RouterState::default();
        let text = render_named(&state, "setup_guest_network", None).text().unwrap().to_string();
        assert!(text.contains("Guest SSID: Not set"));

        state.guest_network_enabled = true;
        let text = render_named(&state, "setup_guest_network", None).text().unwrap().to_string();
        assert!(text.contains("Guest Network: Enabled"));
        assert!(text.contains("Guest SSID: XiaoYi_Guest"));
    }

    #[test]
    fn parental_controls_lists_devices() {
        let state = RouterState::default();
        let result = render_named(&state, "parental_controls", None);
        let text = result.text().unwrap();
        for device in &state.connected_devices {
            assert!(text.contains(&device.mac));
        }
    }

    // ── security_audit scoring ────────────────────────────────────

    #[test]
    fn default_state_scores_seventy() {
        // WPA3 30 + 19-char password 25 + clean SSID 15 + guest disabled 0
        let audit = security_audit(&RouterState::default());
        assert_eq!(audit.score, 70);
        assert_eq!(
            audit.recommendations,
            vec![
                "Consider enabling guest network for visitors".to_string(),
                "Keep firmware updated - check regularly with `check_firmware_update()`"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn perfect_configuration_scores_hundred() {
        let mut state = RouterState::default();
        state.guest_network_enabled = true;
        let audit = security_audit(&state);
        assert_eq!(audit.score, 100);
        assert_eq!(audit.recommendations.len(), 1);
    }

    #[test]
    fn weak_configuration_recommendations_follow_check_order() {
        let mut state = RouterState::default();
        state.security_mode = "WEP".into();
        state.password = "short".into();
        state.ssid = "Default_Router".into();
        state.guest_network_enabled = true;
        state.guest_password = "short".into();

        let audit = security_audit(&state);
        // WEP 5 + short 0 + default SSID 0 + guest enabled 15 + same password 0
        assert_eq!(audit.score, 20);
        assert_eq!(audit.recommendations.len(), 5);
        assert!(audit.recommendations[0].contains("Upgrade to WPA3"));
        assert!(audit.recommendations[1].contains("Password is too short"));
        assert!(audit.recommendations[2].contains("Change default SSID"));
        assert!(audit.recommendations[3].contains("different password for guest"));
        assert!(audit.recommendations[4].contains("Keep firmware updated"));
    }

    #[test]
    fn password_length_tiers() {
        let mut state = RouterState::default();
        state.security_mode = "WPA2".into();
        state.password = "twelve_chars".into();
        let audit = security_audit(&state);
        // WPA2 20 + 12 chars 20 + SSID 15
        assert_eq!(audit.score, 55);
        assert!(audit.recommendations[0].contains("Consider upgrading to WPA3"));

        state.password = "eightchr".into();
        let audit = security_audit(&state);
        assert_eq!(audit.score, 45);
        assert!(audit.recommendations[1].contains("Use a longer password"));
    }

    #[test]
    fn audit_report_never_leaks_password() {
        let state = RouterState::default();
        let result = render_named(&state, "security_audit", None);
        let text = result.text().unwrap();
        assert!(text.contains("Overall Security Score: 70/100"));
        assert!(text.contains("Password Length: 19 characters"));
        assert!(!text.contains(&state.password));
        assert!(text.contains("1. Consider enabling guest network"));
    }
}
