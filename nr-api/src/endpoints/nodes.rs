//! Node module and node set endpoints.

use serde::Serialize;
use serde_json::Value;
use nr_core::error::NrResult;
use crate::client::ApiClient;

/// Body of `POST /nodes`.
#[derive(Debug, Clone, Serialize)]
pub struct InstallNodeRequest {
    /// npm package name, optionally scoped (`@scope/name`).
    pub module: String,
    /// Specific version to install; the latest when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnabledRequest {
    enabled: bool,
}

impl ApiClient {
    /// Get the list of installed node sets.
    pub async fn nodes(&self) -> NrResult<Value> {
        self.get("/nodes").await
    }

    /// Install a node module from npm (latest version).
    pub async fn install_node(&self, module: &str) -> NrResult<Value> {
        self.install_node_with(&InstallNodeRequest {
            module: module.to_string(),
            version: None,
        })
        .await
    }

    /// Install a node module with full control over the request body.
    pub async fn install_node_with(&self, request: &InstallNodeRequest) -> NrResult<Value> {
        let body = serde_json::to_value(request)?;
        self.post("/nodes", body).await
    }

    /// Get a node module's information.
    pub async fn node_module(&self, module: &str) -> NrResult<Value> {
        self.get(&format!("/nodes/{module}")).await
    }

    /// Enable or disable every node set of a module.
    pub async fn update_node_module(&self, module: &str, enabled: bool) -> NrResult<Value> {
        let body = serde_json::to_value(EnabledRequest { enabled })?;
        self.put(&format!("/nodes/{module}"), body).await
    }

    /// Uninstall a node module.
    pub async fn delete_node_module(&self, module: &str) -> NrResult<Value> {
        self.delete(&format!("/nodes/{module}")).await
    }

    /// Get a node set's information.
    pub async fn node_set(&self, module: &str, set: &str) -> NrResult<Value> {
        self.get(&format!("/nodes/{module}/{set}")).await
    }

    /// Enable or disable a single node set.
    pub async fn update_node_set(&self, module: &str, set: &str, enabled: bool) -> NrResult<Value> {
        let body = serde_json::to_value(EnabledRequest { enabled })?;
        self.put(&format!("/nodes/{module}/{set}"), body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_request_serialize() {
        let req = InstallNodeRequest {
            module: "node-red-contrib-foo".into(),
            version: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"module": "node-red-contrib-foo"}));

        let req = InstallNodeRequest {
            module: "@scope/node-red-bar".into(),
            version: Some("1.2.0".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["version"], "1.2.0");
    }
}
