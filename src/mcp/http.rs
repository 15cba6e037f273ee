//! Streamable HTTP transport.
//!
//! JSON-RPC messages are POSTed to `/sse`; each request gets a single JSON
//! response, notifications get `202 Accepted`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::server::McpServer;

pub fn build_router(server: McpServer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", post(rpc))
        .route("/sse/", post(rpc))
        .route("/health", get(health))
        .layer(Extension(server))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn rpc(Extension(server): Extension<McpServer>, body: String) -> Response {
    match server.handle(&body).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
