//! Normalized result of dispatching a command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::ErrorInfo;
use crate::ports::TransportError;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureOrigin {
    /// The command never produced a usable reply (timeout, connection, decoding).
    Transport,
    /// The proxy answered with `status=error`.
    Application,
}

/// Failure details carried by an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    /// `Timeout`, `TransportUnavailable`, `ProtocolError`, or the
    /// application's own kind.
    pub kind: String,
    pub message: String,
    pub origin: FailureOrigin,
}

/// Single success/failure shape returned to every operation caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the command succeeded.
    pub success: bool,

    /// Result data (if success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Error details (if failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
}

impl Outcome {
    /// Create a success outcome.
    #[must_use]
    pub const fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failure from an application-level error reply.
    pub fn application_error(error: ErrorInfo) -> Self {
        Self::failure(OutcomeError {
            kind: error.kind,
            message: error.message,
            origin: FailureOrigin::Application,
        })
    }

    /// Create a failure from a transport-level error.
    pub fn transport_error(error: &TransportError) -> Self {
        Self::failure(OutcomeError {
            kind: error.kind().to_string(),
            message: error.to_string(),
            origin: FailureOrigin::Transport,
        })
    }

    const fn failure(error: OutcomeError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Error kind, if this outcome is a failure.
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }

    /// Convert into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<Value, OutcomeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_success_serializes_without_error() {
        let outcome = Outcome::success(json!({"pageCount": 1}));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true, "data": {"pageCount": 1}})
        );
    }

    #[test]
    fn test_application_error_keeps_proxy_kind() {
        let outcome =
            Outcome::application_error(ErrorInfo::new("DocumentNotOpen", "Open a document first"));

        assert!(!outcome.success);
        assert_eq!(outcome.error_kind(), Some("DocumentNotOpen"));
        let error = outcome.error.as_ref().unwrap();
        assert_eq!(error.origin, FailureOrigin::Application);
        assert_eq!(error.message, "Open a document first");
    }

    #[test]
    fn test_transport_error_uses_taxonomy_kind() {
        let outcome = Outcome::transport_error(&TransportError::Timeout {
            after: Duration::from_secs(20),
        });

        assert_eq!(outcome.error_kind(), Some("Timeout"));
        assert_eq!(outcome.error.unwrap().origin, FailureOrigin::Transport);
    }

    #[test]
    fn test_failure_serializes_origin() {
        let outcome = Outcome::transport_error(&TransportError::Unavailable(
            "connection refused".to_string(),
        ));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["kind"], json!("TransportUnavailable"));
        assert_eq!(value["error"]["origin"], json!("transport"));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            Outcome::success(json!([1, 2])).into_result().unwrap(),
            json!([1, 2])
        );

        let err = Outcome::application_error(ErrorInfo::new("Busy", "try later"))
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind, "Busy");
    }
}
