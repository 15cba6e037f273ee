//! Router construction for the REST server.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use router_core::RouterService;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;

/// Build the full axum router with all routes and middleware.
pub fn build_router(service: RouterService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/resources", get(handlers::resources::list_resources))
        .route("/resources/:id", get(handlers::resources::read_resource))
        .route("/tools", get(handlers::tools::list_tools))
        .route("/tools/:name", post(handlers::tools::call_tool))
        .route("/prompts", get(handlers::prompts::list_prompts))
        .route("/prompts/:name", post(handlers::prompts::get_prompt))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
