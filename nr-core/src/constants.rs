//! Client-wide constants.

/// Client name, used for the data directory and log file prefix.
pub const APP_NAME: &str = "node-red-admin";

/// Address of a default local Node-RED install.
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:1880";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Defaults for the password grant of `/auth/token`.
pub mod auth {
    /// Client id the Node-RED editor and admin tools register with.
    pub const CLIENT_ID: &str = "node-red-admin";
    pub const GRANT_TYPE_PASSWORD: &str = "password";
    /// Full access scope.
    pub const SCOPE_ALL: &str = "*";
}

/// Header names understood by the Admin API.
pub mod headers {
    /// Selects what a flow deploy restarts.
    pub const DEPLOYMENT_TYPE: &str = "Node-RED-Deployment-Type";
    /// Selects the response format of `/flows`.
    pub const API_VERSION: &str = "Node-RED-API-Version";
}
