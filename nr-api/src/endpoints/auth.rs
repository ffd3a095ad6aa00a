//! Authentication endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use nr_core::constants::auth;
use nr_core::error::NrResult;

use crate::client::{ApiClient, RequestSpec};

/// Credentials for `POST /auth/token`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub grant_type: String,
    pub scope: String,
    pub username: String,
    pub password: String,
}

impl TokenRequest {
    /// Password grant with full scope for the admin client id.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client_id: auth::CLIENT_ID.to_string(),
            grant_type: auth::GRANT_TYPE_PASSWORD.to_string(),
            scope: auth::SCOPE_ALL.to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Restrict the requested scope (e.g. "read").
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("client_id", &self.client_id)
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Get the active authentication scheme.
    ///
    /// An empty object means the admin API is not secured.
    pub async fn auth_login(&self) -> NrResult<Value> {
        self.execute(RequestSpec::get("/auth/login").without_auth())
            .await
    }

    /// Exchange credentials for an access token.
    ///
    /// On success the returned `access_token` is stored and used for every
    /// later authenticated call. The full response is returned unchanged.
    pub async fn auth_token(&self, request: &TokenRequest) -> NrResult<Value> {
        let body = serde_json::to_value(request)?;
        let response = self
            .execute(RequestSpec::post("/auth/token", body).without_auth())
            .await?;

        if let Some(token) = response.get("access_token").and_then(Value::as_str) {
            self.set_access_token(Some(token.to_string())).await;
            info!("access token acquired for {}", request.username);
        }

        Ok(response)
    }

    /// Revoke an access token.
    pub async fn auth_revoke(&self, token: &str) -> NrResult<Value> {
        self.post("/auth/revoke", serde_json::json!({ "token": token }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_defaults() {
        let req = TokenRequest::password("admin", "secret");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["client_id"], "node-red-admin");
        assert_eq!(json["grant_type"], "password");
        assert_eq!(json["scope"], "*");
        assert_eq!(json["username"], "admin");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_token_request_debug_hides_password() {
        let req = TokenRequest::password("admin", "secret").with_scope("read");
        let printed = format!("{req:?}");
        assert!(printed.contains("read"));
        assert!(!printed.contains("secret"));
    }
}
