//! Error types for the Node-RED Admin API client.
//!
//! Two layers are kept apart:
//! - [`ApiError`] is the taxonomy for responses the server did send but that
//!   did not succeed (or could not be understood). Every kind carries the
//!   same payload: status, optional application code, and raw details.
//! - [`NrError`] is the unified error returned by every fallible operation.
//!   It wraps `ApiError` alongside transport, configuration and I/O failures,
//!   so a refused connection is never confused with an HTTP error response.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Convenience type alias for Results using NrError.
pub type NrResult<T> = Result<T, NrError>;

/// Key under which an unparseable response body is stored in `details`.
pub const RAW_BODY_KEY: &str = "raw_body";

/// Unified error type covering all error categories of the client.
#[derive(Error, Debug)]
pub enum NrError {
    // -- Protocol errors --
    /// The server answered with a non-success status or an unreadable body.
    #[error(transparent)]
    Api(#[from] ApiError),

    // -- Transport errors --
    /// The server could not be reached (connection refused, DNS, TLS).
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Any other transport-level failure.
    #[error("http error: {0}")]
    Http(String),

    // -- Local errors --
    /// The request could not be built from the given parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to load or parse client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl NrError {
    /// The taxonomy error, if this failure came from a server response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            NrError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the server was never reached or never answered.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, NrError::Connection(_) | NrError::Timeout(_))
    }
}

impl From<serde_json::Error> for NrError {
    fn from(e: serde_json::Error) -> Self {
        NrError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for NrError {
    fn from(e: toml::de::Error) -> Self {
        NrError::Config(e.to_string())
    }
}

/// Classification of an unsuccessful API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 400: the request was malformed.
    BadRequest,
    /// 401: missing, invalid or expired token.
    Authentication,
    /// 404: the resource does not exist.
    NotFound,
    /// 409: revision mismatch.
    Conflict,
    /// Any other 4xx.
    Client,
    /// Any 5xx.
    Server,
    /// Any other status class, or a success status with a body that is not JSON.
    UnexpectedResponse,
}

impl ApiErrorKind {
    /// Map an HTTP status code to its kind. Success codes have no kind.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400 => Some(Self::BadRequest),
            401 => Some(Self::Authentication),
            404 => Some(Self::NotFound),
            409 => Some(Self::Conflict),
            402..=499 => Some(Self::Client),
            500..=599 => Some(Self::Server),
            _ => Some(Self::UnexpectedResponse),
        }
    }

    /// Human-readable label used in `Display`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::Authentication => "authentication failed",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Client => "api error",
            Self::Server => "server error",
            Self::UnexpectedResponse => "unexpected response",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed API call, with everything the server told us about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: u16,
    message: String,
    code: Option<String>,
    details: Option<Value>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Attach the application-level error code from the response body.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Attach the parsed response body (or its raw-text wrapper).
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// The original body text when it could not be parsed as JSON.
    pub fn raw_body(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.get(RAW_BODY_KEY))
            .and_then(Value::as_str)
    }

    pub fn is_authentication(&self) -> bool {
        self.kind == ApiErrorKind::Authentication
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ApiErrorKind::Conflict
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {}): {}", self.kind, self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_named_statuses() {
        assert_eq!(ApiErrorKind::from_status(400), Some(ApiErrorKind::BadRequest));
        assert_eq!(ApiErrorKind::from_status(401), Some(ApiErrorKind::Authentication));
        assert_eq!(ApiErrorKind::from_status(404), Some(ApiErrorKind::NotFound));
        assert_eq!(ApiErrorKind::from_status(409), Some(ApiErrorKind::Conflict));
    }

    #[test]
    fn test_kind_from_status_classes() {
        assert_eq!(ApiErrorKind::from_status(200), None);
        assert_eq!(ApiErrorKind::from_status(204), None);
        assert_eq!(ApiErrorKind::from_status(403), Some(ApiErrorKind::Client));
        assert_eq!(ApiErrorKind::from_status(422), Some(ApiErrorKind::Client));
        assert_eq!(ApiErrorKind::from_status(500), Some(ApiErrorKind::Server));
        assert_eq!(ApiErrorKind::from_status(503), Some(ApiErrorKind::Server));
        assert_eq!(ApiErrorKind::from_status(302), Some(ApiErrorKind::UnexpectedResponse));
        assert_eq!(ApiErrorKind::from_status(101), Some(ApiErrorKind::UnexpectedResponse));
        assert_eq!(ApiErrorKind::from_status(600), Some(ApiErrorKind::UnexpectedResponse));
    }

    #[test]
    fn test_api_error_builder() {
        let err = ApiError::new(ApiErrorKind::Conflict, 409, "Problem")
            .with_code(Some("invalid_request".into()))
            .with_details(Some(json!({"code": "invalid_request", "message": "Problem"})));
        assert!(err.is_conflict());
        assert_eq!(err.status(), 409);
        assert_eq!(err.code(), Some("invalid_request"));
        assert_eq!(err.details().unwrap()["message"], "Problem");
        assert!(err.raw_body().is_none());
    }

    #[test]
    fn test_raw_body_accessor() {
        let err = ApiError::new(ApiErrorKind::UnexpectedResponse, 200, "Invalid JSON response")
            .with_details(Some(json!({"raw_body": "<html>"})));
        assert_eq!(err.raw_body(), Some("<html>"));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new(ApiErrorKind::Authentication, 401, "Unauthorized");
        assert_eq!(err.to_string(), "authentication failed (status 401): Unauthorized");
    }

    #[test]
    fn test_nr_error_layers() {
        let api: NrError = ApiError::new(ApiErrorKind::Server, 500, "boom").into();
        assert_eq!(api.api_error().map(ApiError::status), Some(500));
        assert!(!api.is_connection_failure());

        let conn = NrError::Connection("refused".into());
        assert!(conn.api_error().is_none());
        assert!(conn.is_connection_failure());
        assert_eq!(conn.to_string(), "connection failed: refused");
    }
}
