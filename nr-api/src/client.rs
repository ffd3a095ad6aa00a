//! HTTP client for the Node-RED Admin API.
//!
//! Every endpoint method funnels through [`ApiClient::execute`], which builds
//! the request (JSON headers, bearer token, optional body), sends it once,
//! and hands the status and body to [`crate::response::classify`].

use std::sync::Arc;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{redirect, Client, Method, RequestBuilder};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use nr_core::config::{AppConfig, ServerConfig};
use nr_core::error::{NrError, NrResult};

use crate::response;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers the dispatcher owns. Custom and per-call values for these are
/// dropped so `use_auth` and the JSON content negotiation always hold.
const RESERVED_HEADERS: [&str; 3] = ["authorization", "content-type", "accept"];

fn is_reserved_header(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name.trim()))
}

/// One API call described as data.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to the base URL; must start with `/`.
    pub path: String,
    /// JSON body. `None` sends no body at all.
    pub body: Option<Value>,
    /// Attach the stored bearer token, if there is one.
    pub use_auth: bool,
    /// Extra headers for this call only.
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            use_auth: true,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send without the `Authorization` header even if a token is stored.
    pub fn without_auth(mut self) -> Self {
        self.use_auth = false;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client for communicating with a Node-RED instance.
///
/// Wraps reqwest::Client with bearer authentication, JSON headers and
/// response classification. Clones share the stored access token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL without trailing slash (e.g. "http://localhost:1880").
    base_url: String,
    /// Bearer token; written by `auth_token`, read by every authenticated call.
    access_token: Arc<RwLock<Option<String>>>,
    /// Custom headers from server config.
    custom_headers: Vec<(String, String)>,
    /// Request timeout applied by the transport.
    timeout: Duration,
}

impl ApiClient {
    /// Create a new ApiClient from server configuration.
    pub fn new(config: &ServerConfig) -> NrResult<Self> {
        let base_url = AppConfig::sanitize_server_address(&config.address);
        if base_url.is_empty() {
            return Err(NrError::Config("server address is empty".into()));
        }

        let timeout = Duration::from_millis(config.api_timeout_ms);
        let inner = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| NrError::Http(format!("failed to build HTTP client: {e}")))?;

        let custom_headers = config
            .custom_headers
            .iter()
            .filter(|(k, _)| {
                let reserved = is_reserved_header(k);
                if reserved {
                    warn!("ignoring custom header {k}: set by the client");
                }
                !reserved
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        debug!("api client created for {base_url}");

        Ok(Self {
            inner,
            base_url,
            access_token: Arc::new(RwLock::new(config.access_token.clone())),
            custom_headers,
            timeout,
        })
    }

    /// Shorthand for a client with default settings pointed at `address`.
    pub fn from_address(address: &str) -> NrResult<Self> {
        Self::new(&ServerConfig::new(address))
    }

    /// Get the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The currently stored access token.
    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Replace (or clear) the stored access token.
    pub async fn set_access_token(&self, token: Option<String>) {
        let mut guard = self.access_token.write().await;
        *guard = token;
        if guard.is_some() {
            debug!("access token set");
        } else {
            debug!("access token cleared");
        }
    }

    /// Resolve an API path against the base URL.
    fn url(&self, path: &str) -> NrResult<String> {
        if !path.starts_with('/') {
            return Err(NrError::InvalidRequest(format!(
                "request path must start with '/': {path}"
            )));
        }
        Ok(format!("{}{path}", self.base_url))
    }

    /// Internal: build the outbound request for a spec.
    fn build_request(
        &self,
        spec: &RequestSpec,
        url: &str,
        token: Option<&str>,
    ) -> NrResult<RequestBuilder> {
        let mut builder = self
            .inner
            .request(spec.method.clone(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        let extra_headers = self
            .custom_headers
            .iter()
            .chain(&spec.headers)
            .filter(|(key, _)| !is_reserved_header(key));
        for (key, value) in extra_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(body) = &spec.body {
            builder = builder.body(serde_json::to_string(body)?);
        }

        Ok(builder)
    }

    /// Execute one API call and return the parsed response body.
    ///
    /// A blank success body yields an empty JSON object. Unsuccessful
    /// responses become `NrError::Api`; transport failures (including a
    /// timeout while reading the body) become `Connection`, `Timeout` or
    /// `Http` and are never retried.
    pub async fn execute(&self, spec: RequestSpec) -> NrResult<Value> {
        let url = self.url(&spec.path)?;
        debug!("{} {}", spec.method, spec.path);

        let token = if spec.use_auth {
            self.access_token.read().await.clone()
        } else {
            None
        };

        let response = self
            .build_request(&spec, &url, token.as_deref())?
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
        // Decoded as UTF-8 regardless of the declared charset; invalid
        // sequences become U+FFFD in `raw_body`.
        let bytes = response.bytes().await.map_err(classify_error)?;
        let body = String::from_utf8_lossy(&bytes);

        response::classify(status, reason.as_deref(), &body).map_err(|err| {
            debug!(
                "{} {} failed: status={} kind={:?}",
                spec.method,
                spec.path,
                err.status(),
                err.kind()
            );
            NrError::Api(err)
        })
    }

    // --- Public HTTP methods ---

    /// Execute an authenticated GET request.
    pub async fn get(&self, path: &str) -> NrResult<Value> {
        self.execute(RequestSpec::get(path)).await
    }

    /// Execute an authenticated POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> NrResult<Value> {
        self.execute(RequestSpec::post(path, body)).await
    }

    /// Execute an authenticated PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> NrResult<Value> {
        self.execute(RequestSpec::put(path, body)).await
    }

    /// Execute an authenticated DELETE request.
    pub async fn delete(&self, path: &str) -> NrResult<Value> {
        self.execute(RequestSpec::delete(path)).await
    }
}

/// Classify a reqwest error into an NrError transport variant.
fn classify_error(e: reqwest::Error) -> NrError {
    if e.is_builder() {
        NrError::InvalidRequest(e.to_string())
    } else if e.is_timeout() {
        NrError::Timeout(e.to_string())
    } else if e.is_connect() {
        NrError::Connection(e.to_string())
    } else {
        NrError::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> ServerConfig {
        ServerConfig::new("http://localhost:1880/")
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = ApiClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1880");
        assert_eq!(client.url("/flows").unwrap(), "http://localhost:1880/flows");
    }

    #[test]
    fn test_path_must_be_absolute() {
        let client = ApiClient::new(&test_config()).unwrap();
        assert!(matches!(client.url("flows"), Err(NrError::InvalidRequest(_))));
    }

    #[test]
    fn test_reserved_headers() {
        assert!(is_reserved_header("Authorization"));
        assert!(is_reserved_header("content-type"));
        assert!(is_reserved_header(" ACCEPT "));
        assert!(!is_reserved_header("X-Tenant"));
        assert!(!is_reserved_header("Node-RED-Deployment-Type"));
    }

    #[test]
    fn test_reserved_custom_headers_are_dropped() {
        let mut config = test_config();
        config
            .custom_headers
            .insert("Authorization".into(), "Bearer other".into());
        config.custom_headers.insert("X-Tenant".into(), "blue".into());
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(
            client.custom_headers,
            vec![("X-Tenant".to_string(), "blue".to_string())]
        );
    }

    #[test]
    fn test_empty_address_is_rejected() {
        let err = ApiClient::new(&ServerConfig::new("  ")).err().unwrap();
        assert!(matches!(err, NrError::Config(_)));
    }

    #[test]
    fn test_timeout_from_config() {
        let mut config = test_config();
        config.api_timeout_ms = 1_500;
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_request_spec_defaults() {
        let spec = RequestSpec::get("/settings");
        assert_eq!(spec.method, Method::GET);
        assert!(spec.use_auth);
        assert!(spec.body.is_none());
        assert!(spec.headers.is_empty());

        let spec = RequestSpec::post("/auth/token", json!({"a": 1}))
            .without_auth()
            .with_header("X-Test", "1");
        assert_eq!(spec.method, Method::POST);
        assert!(!spec.use_auth);
        assert_eq!(spec.body, Some(json!({"a": 1})));
        assert_eq!(spec.headers, vec![("X-Test".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn test_token_is_shared_between_clones() {
        let client = ApiClient::new(&test_config().with_access_token("first")).unwrap();
        let clone = client.clone();
        assert_eq!(clone.access_token().await.as_deref(), Some("first"));

        client.set_access_token(Some("second".into())).await;
        assert_eq!(clone.access_token().await.as_deref(), Some("second"));

        clone.set_access_token(None).await;
        assert!(client.access_token().await.is_none());
    }
}
