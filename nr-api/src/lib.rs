//! Node-RED Admin API - HTTP client for the Node-RED Admin REST API.
//!
//! This crate maps each Admin API endpoint (authentication, settings and
//! diagnostics, flows, node modules) to an async method on [`ApiClient`].
//! All calls go through [`ApiClient::execute`], which attaches the bearer
//! token, sends the request once, and classifies the response into either
//! parsed JSON or an [`nr_core::ApiError`]. Transport failures are reported
//! separately as `NrError::Connection`, `Timeout` or `Http`.

pub mod client;
pub mod endpoints;
pub mod response;

// Re-export key types
pub use client::{ApiClient, RequestSpec};
pub use endpoints::auth::TokenRequest;
pub use endpoints::flows::{DeploymentType, FlowState};
pub use endpoints::nodes::InstallNodeRequest;
pub use nr_core::{ApiError, ApiErrorKind, NrError, NrResult};
