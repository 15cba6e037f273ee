//! RouterService: the dispatch layer both transports call into.
//!
//! Owns the one [`RouterState`] behind a mutex. Each operation holds the lock
//! for its full duration, so readers never observe a half-applied mutation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::RouterError;
use crate::prompts::{self, PromptDescriptor, PromptRequest, PromptResult};
use crate::resources::{self, ResourceContent, ResourceDescriptor, ResourceId};
use crate::state::RouterState;
use crate::tools::{self, ToolCall, ToolDescriptor, ToolOutcome, ToolStatus};

#[derive(Clone, Default)]
pub struct RouterService {
    state: Arc<Mutex<RouterState>>,
}

impl RouterService {
    pub fn new(state: RouterState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        resources::list()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContent, RouterError> {
        let id = ResourceId::from_uri(uri)?;
        let state = self.state.lock().await;
        resources::read(&state, id)
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        tools::list()
    }

    /// Validate and run a tool. `Cancelled` comes back as `Ok`.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<ToolOutcome, RouterError> {
        let call = ToolCall::parse(name, args).inspect_err(|e| {
            tracing::debug!(tool = name, error = %e, "Tool call rejected");
        })?;

        let mut state = self.state.lock().await;
        let result = tools::execute(&mut state, call);
        match &result {
            Ok(outcome) if outcome.status == ToolStatus::Cancelled => {
                tracing::info!(tool = name, "Tool call cancelled");
            }
            Ok(_) => tracing::info!(tool = name, "Tool call succeeded"),
            Err(e) => tracing::warn!(tool = name, error = %e, "Tool call failed"),
        }
        result
    }

    pub fn list_prompts(&self) -> Vec<PromptDescriptor> {
        prompts::list()
    }

    pub async fn get_prompt(
        &self,
        name: &str,
        args: Option<&HashMap<String, String>>,
    ) -> Result<PromptResult, RouterError> {
        let request = PromptRequest::parse(name, args)?;
        let state = self.state.lock().await;
        Ok(prompts::render(&state, &request))
    }

    /// Run `f` against a consistent view of the state.
    pub async fn inspect<T>(&self, f: impl FnOnce(&RouterState) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_names_fail_without_mutation() {
        let service = RouterService::default();
        let before = service.inspect(|s| s.logs.clone()).await;

        let err = service.read_resource("router://bogus").await.unwrap_err();
        assert!(matches!(err, RouterError::NotFound(_)));

        let err = service.call_tool("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, RouterError::NotFound(_)));

        let err = service.get_prompt("nope", None).await.unwrap_err();
        assert!(matches!(err, RouterError::NotFound(_)));

        assert_eq!(service.inspect(|s| s.logs.clone()).await, before);
    }

    #[tokio::test]
    async fn clones_share_one_state() {
        let service = RouterService::default();
        let other = service.clone();

        other
            .call_tool("change_ssid", json!({"new_ssid": "Shared"}))
            .await
            .unwrap();

        let config = service.read_resource("router://config").await.unwrap();
        assert_eq!(config.into_value()["ssid"], "Shared");
    }

    #[tokio::test]
    async fn config_never_returns_stored_password() {
        let service = RouterService::default();
        service
            .call_tool("change_wifi_password", json!({"new_password": "topsecret99"}))
            .await
            .unwrap();

        let text = service
            .read_resource("router://config")
            .await
            .unwrap()
            .to_text();
        assert!(!text.contains("topsecret99"));
        assert!(text.contains(crate::state::PASSWORD_MASK));
    }

    #[tokio::test]
    async fn mutation_then_log_read_shows_newest_first() {
        let service = RouterService::default();
        service
            .call_tool("reboot_router", json!({"confirm": true}))
            .await
            .unwrap();

        match service.read_resource("router://logs").await.unwrap() {
            ResourceContent::Text(text) => {
                assert!(text.lines().next().unwrap().ends_with("Router rebooted"));
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(service.inspect(|s| s.uptime_seconds).await, 0);
    }

    #[tokio::test]
    async fn prompt_reads_live_state() {
        let service = RouterService::default();
        service
            .call_tool("change_channel", json!({"channel": 11}))
            .await
            .unwrap();

        let mut args = HashMap::new();
        args.insert("issue_type".to_string(), "slow_speed".to_string());
        let prompt = service
            .get_prompt("troubleshoot_connection", Some(&args))
            .await
            .unwrap();
        assert!(prompt.text().unwrap().contains("- Channel: 11"));
    }
}
