//! Unified error value for calls to the remote service.
//!
//! Non-2xx responses with a JSON object body decode to [`ApiError::Service`];
//! anything else degrades to [`ApiError::Status`] carrying status and status
//! text. Callers discriminate with [`ApiError::kind`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Marker the service puts in `error` when a row already exists
pub const DUPLICATE_MARKER: &str = "duplicate";

/// Decoded JSON error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub expected: Option<Vec<String>>,
    #[serde(default)]
    pub found: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceErrorBody {
    /// `error` field, looked up at top level then inside `detail`.
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| {
            self.detail
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(Value::as_str)
        })
    }

    /// Human-readable text the service attached, if any.
    pub fn text(&self) -> Option<String> {
        if let Some(message) = &self.message {
            return Some(message.clone());
        }
        match &self.detail {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(o)) => o.get("message").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {status} {status_text}")]
    Service {
        status: u16,
        status_text: String,
        body: ServiceErrorBody,
    },

    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        text: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The (region, assembly) pair already exists
    Conflict,
    /// An identical row already exists
    Duplicate,
    NotFound,
    Transport,
    Other,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ServiceErrorBody> {
        match self {
            ApiError::Service { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        if let ApiError::Transport(_) = self {
            return ApiErrorKind::Transport;
        }
        if self.body().and_then(ServiceErrorBody::error_code) == Some(DUPLICATE_MARKER) {
            return ApiErrorKind::Duplicate;
        }
        match self.status() {
            Some(409) => ApiErrorKind::Conflict,
            Some(404) => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Other,
        }
    }

    /// Service-provided message, if the body carried one.
    pub fn service_message(&self) -> Option<String> {
        self.body().and_then(ServiceErrorBody::text)
    }
}

/// Builds the error value for a non-2xx response.
pub fn decode_error(status: u16, status_text: &str, text: &str) -> ApiError {
    let status_only = || ApiError::Status {
        status,
        status_text: status_text.to_string(),
        text: text.to_string(),
    };

    if text.trim().is_empty() {
        return status_only();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => match serde_json::from_value::<ServiceErrorBody>(value) {
            Ok(body) => ApiError::Service {
                status,
                status_text: status_text.to_string(),
                body,
            },
            Err(_) => status_only(),
        },
        _ => status_only(),
    }
}

/// Decodes a 2xx body; an empty body reads as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let source = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(source).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_decodes_to_service_error() {
        let err = decode_error(400, "Bad Request", r#"{"error":"duplicate","message":"Ligne existante"}"#);

        assert_eq!(err.kind(), ApiErrorKind::Duplicate);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.service_message().as_deref(), Some("Ligne existante"));
    }

    #[test]
    fn test_duplicate_inside_detail() {
        let err = decode_error(409, "Conflict", r#"{"detail":{"error":"duplicate"}}"#);
        assert_eq!(err.kind(), ApiErrorKind::Duplicate);
    }

    #[test]
    fn test_conflict_from_status() {
        let err = decode_error(409, "Conflict", r#"{"detail":"Table already exists"}"#);

        assert_eq!(err.kind(), ApiErrorKind::Conflict);
        assert_eq!(err.service_message().as_deref(), Some("Table already exists"));
    }

    #[test]
    fn test_non_json_body_degrades_to_status() {
        let err = decode_error(502, "Bad Gateway", "<html>upstream down</html>");

        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                status_text: "Bad Gateway".to_string(),
                text: "<html>upstream down</html>".to_string(),
            }
        );
        assert_eq!(err.kind(), ApiErrorKind::Other);
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_empty_and_scalar_bodies_degrade_to_status() {
        assert!(matches!(decode_error(404, "Not Found", ""), ApiError::Status { .. }));
        assert_eq!(decode_error(404, "Not Found", "").kind(), ApiErrorKind::NotFound);
        assert!(matches!(decode_error(500, "", "\"boom\""), ApiError::Status { .. }));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let err = decode_error(422, "Unprocessable", r#"{"error":"schema","expected":["A"],"found":["B"],"sheet":"S1"}"#);
        let body = err.body().unwrap();

        assert_eq!(body.expected.as_deref(), Some(&["A".to_string()][..]));
        assert_eq!(body.extra.get("sheet"), Some(&Value::String("S1".into())));
        assert_eq!(err.kind(), ApiErrorKind::Other);
    }

    #[test]
    fn test_transport_kind() {
        assert_eq!(ApiError::Transport("offline".into()).kind(), ApiErrorKind::Transport);
    }

    #[test]
    fn test_decode_body_accepts_empty() {
        let unit: Value = decode_body("").unwrap();
        assert_eq!(unit, Value::Null);

        let err = decode_body::<Vec<String>>("{}").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
