//! # Response Envelope
//!
//! The REST-like `{status, data, error}` shape every backend call answers
//! with. Status 200 means success and carries `data`; anything else carries
//! `error` with the user-facing message.
//!
//! ## Serialization
//! ```json
//! { "status": 200, "data": { "id": "..." } }
//! { "status": 404, "error": "Cliente não encontrado" }
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{BackendError, BackendResult};

/// Response envelope for a backend operation.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiEnvelope<T> {
    /// HTTP-like status code: 200, 400, 404 or 409.
    pub status: u16,
    /// Present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Present on failure; ready for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    pub fn ok(data: T) -> Self {
        ApiEnvelope {
            status: 200,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure, taking the status code from the error's kind.
    pub fn failure(err: &BackendError) -> Self {
        ApiEnvelope {
            status: err.status_code(),
            data: None,
            error: Some(err.to_string()),
        }
    }

    /// Converts a service result into the wire shape.
    pub fn from_result(result: BackendResult<T>) -> Self {
        match result {
            Ok(data) => ApiEnvelope::ok(data),
            Err(err) => ApiEnvelope::failure(&err),
        }
    }

    /// True when the envelope carries data.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Entity;

    #[test]
    fn test_success_envelope() {
        let envelope = ApiEnvelope::ok(41 + 1);
        assert!(envelope.is_success());
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data, Some(42));
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_failure_envelope_takes_status_from_error() {
        let err = BackendError::not_found(Entity::Customer, "c1");
        let envelope = ApiEnvelope::<()>::failure(&err);
        assert!(!envelope.is_success());
        assert_eq!(envelope.status, 404);
        assert_eq!(envelope.error.as_deref(), Some("Cliente não encontrado"));
    }

    #[test]
    fn test_wire_shape_skips_absent_fields() {
        let ok = serde_json::to_value(ApiEnvelope::ok("x")).unwrap();
        assert_eq!(ok, serde_json::json!({ "status": 200, "data": "x" }));

        let err = BackendError::AlreadyCanceled {
            code: "VND-001".to_string(),
        };
        let failed = serde_json::to_value(ApiEnvelope::<String>::failure(&err)).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "status": 409, "error": "Venda já cancelada" })
        );
    }
}
