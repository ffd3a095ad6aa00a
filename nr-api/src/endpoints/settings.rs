//! Runtime settings and diagnostics endpoints.

use serde_json::Value;
use nr_core::error::NrResult;
use crate::client::ApiClient;

impl ApiClient {
    /// Get the runtime settings (`httpNodeRoot`, `version`, editor config).
    pub async fn settings(&self) -> NrResult<Value> {
        self.get("/settings").await
    }

    /// Get the runtime diagnostics report. Requires Node-RED 1.1.0 or later;
    /// older servers answer 404.
    pub async fn diagnostics(&self) -> NrResult<Value> {
        self.get("/diagnostics").await
    }
}
