//! HTTP error mapping for [`RouterError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use router_core::RouterError;

/// Handler error: status from [`RouterError::http_status`], body
/// `{"status": "error", "message": ...}`.
#[derive(Debug)]
pub struct AppError(pub RouterError);

impl From<RouterError> for AppError {
    fn from(err: RouterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        } else {
            tracing::debug!("request rejected ({}): {}", status, self.0);
        }
        (status, Json(self.0.to_payload())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: RouterError) -> (StatusCode, serde_json::Value) {
        let resp = AppError(err).into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_maps_to_500_with_payload() {
        let (status, body) = render(RouterError::from(anyhow::anyhow!("serializing stats"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "internal: serializing stats");
    }

    #[tokio::test]
    async fn not_found_maps_to_400() {
        let (status, body) = render(RouterError::not_found("Unknown tool: nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Unknown tool: nope");
    }
}
