//! Wire model for commands sent to the proxy and the replies it returns.
//!
//! Parameters are an open JSON mapping. `serde_json::Value` is a closed enum
//! (null, bool, number, string, array, object), so every payload an operation
//! builds is representable and (de)serialization is total.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Operation parameters: string keys mapped to arbitrarily nested JSON values.
pub type Parameters = Map<String, Value>;

/// Correlation identity tying a reply to the command that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named operation addressed to the target application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Operation name, e.g. `createDocument`.
    pub name: String,
    /// Assigned once by the builder, never reused while a reply is outstanding.
    pub id: CommandId,
    /// Operation-specific payload. Not validated here.
    #[serde(default)]
    pub parameters: Parameters,
}

/// Request as it appears on the wire: the command plus the application it targets.
///
/// Serializes flat, i.e. `{"application", "name", "id", "parameters"}`.
#[derive(Debug, Serialize)]
pub struct RequestFrame<'a> {
    pub application: &'a str,
    #[serde(flatten)]
    pub command: &'a Command,
}

/// Application-level failure reported by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Proxy/application-defined category, e.g. `DocumentNotOpen`.
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Payload of a decoded reply.
///
/// Exactly one of result/error exists, so the invariant lives in the type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Ok(Value),
    Error(ErrorInfo),
}

/// Reply from the proxy for one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResponse", into = "WireResponse")]
pub struct Response {
    pub id: CommandId,
    pub body: ResponseBody,
}

impl Response {
    pub const fn ok(id: CommandId, result: Value) -> Self {
        Self {
            id,
            body: ResponseBody::Ok(result),
        }
    }

    pub const fn error(id: CommandId, error: ErrorInfo) -> Self {
        Self {
            id,
            body: ResponseBody::Error(error),
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self.body, ResponseBody::Ok(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Ok,
    Error,
}

/// Flat wire shape: `{id, status, result, error}`.
#[derive(Debug, Serialize, Deserialize)]
struct WireResponse {
    id: CommandId,
    status: ResponseStatus,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorInfo>,
}

impl TryFrom<WireResponse> for Response {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        let body = match (wire.status, wire.result, wire.error) {
            (ResponseStatus::Ok, result, None) => ResponseBody::Ok(result.unwrap_or(Value::Null)),
            (ResponseStatus::Ok, _, Some(_)) => {
                return Err(format!("reply {} has status ok but carries an error", wire.id));
            }
            (ResponseStatus::Error, None, Some(error)) => ResponseBody::Error(error),
            (ResponseStatus::Error, Some(_), Some(_)) => {
                return Err(format!("reply {} has status error but carries a result", wire.id));
            }
            (ResponseStatus::Error, _, None) => {
                return Err(format!("reply {} has status error but no error object", wire.id));
            }
        };

        Ok(Self { id: wire.id, body })
    }
}

impl From<Response> for WireResponse {
    fn from(response: Response) -> Self {
        match response.body {
            ResponseBody::Ok(result) => Self {
                id: response.id,
                status: ResponseStatus::Ok,
                result: Some(result),
                error: None,
            },
            ResponseBody::Error(error) => Self {
                id: response.id,
                status: ResponseStatus::Error,
                result: None,
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_command_round_trip_with_nested_parameters() {
        let command = Command {
            name: "createDocument".to_string(),
            id: CommandId(7),
            parameters: params(json!({
                "pageWidth": 612,
                "pageHeight": 792.5,
                "facingPages": false,
                "intent": "WEB_INTENT",
                "margins": {"top": 36, "bottom": 36, "nested": {"deep": [1, "two", null]}},
                "position": null,
                "bounds": [[72, 72], [500, 400]],
                "large": u64::MAX,
                "negative": -12
            })),
        };

        let encoded = serde_json::to_string(&command).unwrap();
        let decoded: Command = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, command);
    }

    #[test]
    fn test_request_frame_is_flat() {
        let command = Command {
            name: "saveDocument".to_string(),
            id: CommandId(3),
            parameters: Parameters::new(),
        };
        let frame = RequestFrame {
            application: "indesign",
            command: &command,
        };

        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            json!({"application": "indesign", "name": "saveDocument", "id": 3, "parameters": {}})
        );

        // The proxy side can read the command straight out of the frame.
        let back: Command = serde_json::from_value(value).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn test_ok_response_round_trip() {
        let response = Response::ok(CommandId(1), json!({"pageCount": 1, "names": ["a", "b"]}));
        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("\"status\":\"ok\""));
        let decoded: Response = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_ok_response_with_null_result_round_trip() {
        let response = Response::ok(CommandId(2), Value::Null);
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: Response = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_error_response_round_trip() {
        let response = Response::error(
            CommandId(9),
            ErrorInfo::new("DocumentNotOpen", "No document is open"),
        );
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: Response = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
        assert!(!decoded.is_ok());
    }

    #[test]
    fn test_missing_result_decodes_as_null() {
        let decoded: Response = serde_json::from_str(r#"{"id":4,"status":"ok"}"#).unwrap();
        assert_eq!(decoded.body, ResponseBody::Ok(Value::Null));
    }

    #[test]
    fn test_inconsistent_status_is_rejected() {
        let ok_with_error = r#"{"id":1,"status":"ok","error":{"kind":"X","message":"y"}}"#;
        assert!(serde_json::from_str::<Response>(ok_with_error).is_err());

        let error_without_error = r#"{"id":1,"status":"error","result":null}"#;
        assert!(serde_json::from_str::<Response>(error_without_error).is_err());

        let error_with_result = r#"{"id":1,"status":"error","result":{"a":1},"error":{"kind":"X"}}"#;
        assert!(serde_json::from_str::<Response>(error_with_result).is_err());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"id":1,"status":"SUCCESS","result":{}}"#;
        assert!(serde_json::from_str::<Response>(json).is_err());
    }

    #[test]
    fn test_error_message_defaults_to_empty() {
        let decoded: Response =
            serde_json::from_str(r#"{"id":5,"status":"error","error":{"kind":"Busy"}}"#).unwrap();
        assert_eq!(decoded.body, ResponseBody::Error(ErrorInfo::new("Busy", "")));
    }
}
