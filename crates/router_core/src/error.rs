use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// Bad or missing operation argument. Raised before any mutation.
    #[error("{0}")]
    Validation(String),

    /// Unknown resource URI, tool, prompt, or device.
    #[error("{0}")]
    NotFound(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RouterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Validation and NotFound share the 400 client-error shape.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::NotFound(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// The `{status, message}` shape both transports surface to clients.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        })
    }
}
