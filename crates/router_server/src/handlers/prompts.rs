//! Prompt endpoints:
//!   GET  /prompts        list prompt descriptors
//!   POST /prompts/:name  render a prompt; optional body of string arguments

use std::collections::HashMap;

use axum::{body::Bytes, extract::Path, Extension, Json};
use router_core::prompts::{PromptDescriptor, PromptResult};
use router_core::RouterService;

use super::optional_json;
use crate::error::AppError;

pub async fn list_prompts(
    Extension(service): Extension<RouterService>,
) -> Json<Vec<PromptDescriptor>> {
    Json(service.list_prompts())
}

pub async fn get_prompt(
    Extension(service): Extension<RouterService>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<PromptResult>, AppError> {
    let args: Option<HashMap<String, String>> = optional_json(&body)?;
    let result = service.get_prompt(&name, args.as_ref()).await?;
    Ok(Json(result))
}
