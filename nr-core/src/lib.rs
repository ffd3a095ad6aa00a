//! Node-RED Core - error taxonomy, configuration, and logging for the
//! Node-RED Admin API client.
//!
//! This crate provides the foundation used by the `nr-api` client:
//! - Client configuration (server address, access token, timeouts)
//! - The `ApiError` taxonomy and the unified `NrError` type
//! - Structured logging with tracing
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{AppConfig, LoggingConfig, ServerConfig};
pub use error::{ApiError, ApiErrorKind, NrError, NrResult};
pub use logging::init_logging;
