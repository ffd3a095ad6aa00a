//! Shared test utilities for integration tests.

#![allow(dead_code)]

use nr_api::ApiClient;
use nr_core::config::ServerConfig;
use wiremock::{MockServer, Request};

/// Create a client without a token pointed at the mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::from_address(&server.uri()).expect("failed to build client")
}

/// Create a client that already holds `token`.
pub fn authed_client_for(server: &MockServer, token: &str) -> ApiClient {
    let config = ServerConfig::new(server.uri()).with_access_token(token);
    ApiClient::new(&config).expect("failed to build client")
}

/// The single request the mock server received.
pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Parse the body of a received request as JSON.
pub fn json_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}
