//! Response classification.
//!
//! Turns an HTTP status and body text into either the parsed JSON payload or
//! a structured [`ApiError`]. Kept free of I/O so every branch can be tested
//! without a server.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use nr_core::error::{ApiError, ApiErrorKind, RAW_BODY_KEY};

/// Classify a response.
///
/// Success statuses yield the parsed body (an empty object when the body is
/// blank). Everything else, including a success status with a body that is
/// not JSON, yields an `ApiError`. `reason` is the phrase from the status
/// line as sent by the server; when absent or blank the canonical phrase is
/// used instead.
pub fn classify(status: StatusCode, reason: Option<&str>, body: &str) -> Result<Value, ApiError> {
    match ApiErrorKind::from_status(status.as_u16()) {
        None => parse_success(status, body),
        Some(kind) => {
            let reason = reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| reason_phrase(status));
            Err(error_from_body(kind, status, reason, body))
        }
    }
}

/// Canonical reason phrase for a status, or `HTTP <code>` for unknown codes.
pub fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn parse_success(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(body).map_err(|e| {
        ApiError::new(
            ApiErrorKind::UnexpectedResponse,
            status.as_u16(),
            format!("Invalid JSON response: {e}"),
        )
        .with_details(Some(raw_body_details(body)))
    })
}

fn error_from_body(kind: ApiErrorKind, status: StatusCode, reason: String, body: &str) -> ApiError {
    if body.trim().is_empty() {
        return ApiError::new(kind, status.as_u16(), reason);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(data) => {
            let message = text_field(&data, "message")
                .or_else(|| text_field(&data, "error"))
                .unwrap_or(reason);
            let code = text_field(&data, "code");
            ApiError::new(kind, status.as_u16(), message)
                .with_code(code)
                .with_details(Some(data))
        }
        Err(_) => ApiError::new(kind, status.as_u16(), reason)
            .with_details(Some(raw_body_details(body))),
    }
}

/// A field rendered as text. Strings are taken as-is; other non-null
/// values use their JSON rendering.
fn text_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn raw_body_details(body: &str) -> Value {
    let mut details = Map::new();
    details.insert(RAW_BODY_KEY.to_string(), Value::String(body.to_string()));
    Value::Object(details)
}
