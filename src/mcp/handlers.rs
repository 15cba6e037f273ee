//! MCP Method Handlers
//!
//! Maps each JSON-RPC method onto [`RouterService`]. Tool failures come back
//! as `isError` results carrying `{status, message}`; resource and prompt
//! failures are JSON-RPC errors.

use router_core::tools::ToolOutcome;
use router_core::{RouterError, RouterService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::protocol::*;

#[derive(Clone)]
pub struct McpHandlers {
    service: RouterService,
}

/// JSON-RPC code for a dispatch failure.
fn rpc_code(err: &RouterError) -> i32 {
    match err {
        RouterError::Validation(_) | RouterError::NotFound(_) => INVALID_PARAMS,
        RouterError::Internal(_) => INTERNAL_ERROR,
    }
}

fn params<T: DeserializeOwned>(value: Value) -> Result<T, (i32, String)> {
    serde_json::from_value(value).map_err(|e| (INVALID_PARAMS, e.to_string()))
}

fn to_result<T: Serialize>(value: T) -> Result<Value, (i32, String)> {
    serde_json::to_value(value)
        .map_err(|e| (INTERNAL_ERROR, format!("Serialization error: {}", e)))
}

impl McpHandlers {
    pub fn new(service: RouterService) -> Self {
        Self { service }
    }

    /// Handle a parsed request. Notifications are processed but yield no response.
    pub async fn handle(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        let notification = req.is_notification();
        let id = req.id.clone();
        let outcome = self.dispatch(&req.method, req.params).await;

        if notification {
            if let Err((_, message)) = &outcome {
                tracing::debug!(method = %req.method, "notification failed: {}", message);
            }
            return None;
        }

        Some(match outcome {
            Ok(v) => JsonRpcResponse::success(id, v),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    async fn dispatch(&self, method: &str, params_value: Value) -> Result<Value, (i32, String)> {
        match method {
            "initialize" => to_result(InitializeResult::for_router()),
            "notifications/initialized" | "ping" => Ok(serde_json::json!({})),

            "resources/list" => to_result(ResourcesListResult {
                resources: self.service.list_resources(),
            }),
            "resources/read" => {
                let p: ResourceReadParams = params(params_value)?;
                self.read_resource(p).await
            }

            "tools/list" => to_result(ToolsListResult {
                tools: self.service.list_tools(),
            }),
            "tools/call" => {
                let p: ToolCallParams = params(params_value)?;
                tracing::debug!("Calling tool: {}", p.name);
                to_result(self.call_tool(p).await)
            }

            "prompts/list" => to_result(PromptsListResult {
                prompts: self.service.list_prompts(),
            }),
            "prompts/get" => {
                let p: PromptGetParams = params(params_value)?;
                let prompt = self
                    .service
                    .get_prompt(&p.name, p.arguments.as_ref())
                    .await
                    .map_err(|e| (rpc_code(&e), e.to_string()))?;
                to_result(PromptGetResult {
                    description: prompt.description,
                    messages: prompt.messages,
                })
            }

            _ => Err((METHOD_NOT_FOUND, format!("Unknown method: {}", method))),
        }
    }

    async fn read_resource(&self, p: ResourceReadParams) -> Result<Value, (i32, String)> {
        let id = router_core::ResourceId::from_uri(&p.uri)
            .map_err(|e| (rpc_code(&e), e.to_string()))?;
        let content = self
            .service
            .read_resource(&p.uri)
            .await
            .map_err(|e| (rpc_code(&e), e.to_string()))?;
        to_result(ResourceReadResult {
            contents: vec![ResourceContents {
                uri: p.uri,
                mime_type: id.mime_type().into(),
                text: content.to_text(),
            }],
        })
    }

    async fn call_tool(&self, p: ToolCallParams) -> ToolCallResult {
        match self.service.call_tool(&p.name, p.arguments).await {
            Ok(outcome) => ToolCallResult::json(&outcome.to_value()),
            Err(e) => ToolCallResult::error(&ToolOutcome::failed(&e).to_value()),
        }
    }
}
