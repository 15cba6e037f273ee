//! Resource endpoints:
//!   GET /resources      list resource descriptors
//!   GET /resources/:id  read one resource by short id or full URI

use axum::{extract::Path, Extension, Json};
use router_core::resources::{ResourceDescriptor, URI_SCHEME};
use router_core::RouterService;
use serde_json::Value;

use crate::error::AppError;

pub async fn list_resources(
    Extension(service): Extension<RouterService>,
) -> Json<Vec<ResourceDescriptor>> {
    Json(service.list_resources())
}

pub async fn read_resource(
    Extension(service): Extension<RouterService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let uri = resource_uri(&id);
    let content = service.read_resource(&uri).await?;
    Ok(Json(content.into_value()))
}

/// Short ids map onto the `router://` scheme; anything with a scheme passes through.
fn resource_uri(id: &str) -> String {
    if id.contains("://") {
        id.to_string()
    } else {
        format!("{}{}", URI_SCHEME, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ids_gain_scheme() {
        assert_eq!(resource_uri("devices"), "router://devices");
        assert_eq!(resource_uri("router://logs"), "router://logs");
    }
}
