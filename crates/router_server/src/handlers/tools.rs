//! Tool endpoints:
//!   GET  /tools        list tool descriptors
//!   POST /tools/:name  invoke a tool; body is the argument object

use axum::{body::Bytes, extract::Path, Extension, Json};
use router_core::tools::{ToolDescriptor, ToolOutcome};
use router_core::RouterService;
use serde_json::{Map, Value};

use super::optional_json;
use crate::error::AppError;

pub async fn list_tools(Extension(service): Extension<RouterService>) -> Json<Vec<ToolDescriptor>> {
    Json(service.list_tools())
}

/// An empty body is treated as `{}`. A malformed one is a 400.
pub async fn call_tool(
    Extension(service): Extension<RouterService>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutcome>, AppError> {
    let args = optional_json::<Value>(&body)?.unwrap_or_else(|| Value::Object(Map::new()));
    let outcome = service.call_tool(&name, args).await?;
    Ok(Json(outcome))
}
