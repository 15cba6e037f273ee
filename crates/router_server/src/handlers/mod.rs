pub mod health;
pub mod prompts;
pub mod resources;
pub mod tools;

use axum::body::Bytes;
use router_core::RouterError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Decode an optional JSON request body. Blank bodies yield `None`; anything
/// else must parse, whatever the content type.
pub(crate) fn optional_json<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| RouterError::validation(format!("Invalid JSON body: {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn blank_body_is_none() {
        for raw in ["", "  \n"] {
            let parsed: Option<serde_json::Value> = optional_json(&Bytes::from(raw)).unwrap();
            assert!(parsed.is_none());
        }
    }

    #[test]
    fn malformed_body_is_validation_error() {
        let err = optional_json::<serde_json::Value>(&Bytes::from("{not json")).unwrap_err();
        assert!(matches!(err.0, RouterError::Validation(_)));
        assert!(err.0.to_string().starts_with("Invalid JSON body: "));
    }

    #[test]
    fn wrong_shape_is_validation_error() {
        let err =
            optional_json::<HashMap<String, String>>(&Bytes::from(r#"{"issue_type": 3}"#)).unwrap_err();
        assert!(matches!(err.0, RouterError::Validation(_)));
    }
}
