//! Flow configuration and runtime state endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nr_core::constants::headers;
use nr_core::error::NrResult;

use crate::client::{ApiClient, RequestSpec};

/// Desired runtime state of the active flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Start,
    Stop,
}

/// What a deploy restarts, sent as `Node-RED-Deployment-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentType {
    /// Replace everything and restart all nodes.
    #[default]
    Full,
    /// Restart only nodes that changed.
    Nodes,
    /// Restart only flows that contain changed nodes.
    Flows,
    /// Reload the stored flows without changing them.
    Reload,
}

impl DeploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Nodes => "nodes",
            Self::Flows => "flows",
            Self::Reload => "reload",
        }
    }
}

/// Body of `POST /flows`.
#[derive(Debug, Serialize)]
struct DeployRequest<'a> {
    flows: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    rev: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SetStateRequest {
    state: FlowState,
}

impl ApiClient {
    /// Get the active flow configuration as an array of nodes.
    pub async fn flows(&self) -> NrResult<Value> {
        self.get("/flows").await
    }

    /// Get the active flow configuration with its revision, `{rev, flows}`.
    pub async fn flows_with_revision(&self) -> NrResult<Value> {
        self.execute(RequestSpec::get("/flows").with_header(headers::API_VERSION, "v2"))
            .await
    }

    /// Get the runtime state of the active flows.
    pub async fn flows_state(&self) -> NrResult<Value> {
        self.get("/flows/state").await
    }

    /// Set the active flow configuration.
    ///
    /// Passing `rev` makes the server reject the deploy with 409 when the
    /// flows changed since that revision was read.
    pub async fn deploy_flows(&self, flows: &Value, rev: Option<&str>) -> NrResult<Value> {
        let body = serde_json::to_value(DeployRequest { flows, rev })?;
        self.post("/flows", body).await
    }

    /// Set the active flow configuration with an explicit deployment type.
    pub async fn deploy_flows_with(
        &self,
        flows: &Value,
        rev: Option<&str>,
        deployment_type: DeploymentType,
    ) -> NrResult<Value> {
        let body = serde_json::to_value(DeployRequest { flows, rev })?;
        self.execute(
            RequestSpec::post("/flows", body)
                .with_header(headers::DEPLOYMENT_TYPE, deployment_type.as_str()),
        )
        .await
    }

    /// Start or stop the active flows.
    pub async fn set_flows_state(&self, state: FlowState) -> NrResult<Value> {
        let body = serde_json::to_value(SetStateRequest { state })?;
        self.post("/flows/state", body).await
    }

    /// Add a flow (tab) to the active configuration. Returns its new id.
    pub async fn add_flow(&self, flow: &Value) -> NrResult<Value> {
        self.post("/flow", flow.clone()).await
    }

    /// Get an individual flow configuration.
    pub async fn flow(&self, id: &str) -> NrResult<Value> {
        self.get(&format!("/flow/{id}")).await
    }

    /// Replace an individual flow configuration.
    pub async fn update_flow(&self, id: &str, flow: &Value) -> NrResult<Value> {
        self.put(&format!("/flow/{id}"), flow.clone()).await
    }

    /// Delete an individual flow.
    pub async fn delete_flow(&self, id: &str) -> NrResult<Value> {
        self.delete(&format!("/flow/{id}")).await
    }
}
