//! Client configuration management.
//!
//! Handles loading, saving, and accessing the client configuration: the
//! Node-RED server address, an optional access token, request timeout and
//! logging preferences. Configuration is persisted as TOML on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{NrError, NrResult};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Node-RED base URL (e.g., "http://localhost:1880").
    #[serde(default = "default_address")]
    pub address: String,

    /// Bearer token from a previous `/auth/token` exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// API request timeout in milliseconds, applied to every request.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// Extra HTTP headers sent with every request.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_address() -> String {
    constants::DEFAULT_SERVER_ADDRESS.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            access_token: None,
            api_timeout_ms: default_api_timeout(),
            custom_headers: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ServerConfig {
    /// Config for the given address with every other field defaulted.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Set the initial access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> NrResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> NrResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file path.
    pub fn save_default(&self) -> NrResult<()> {
        let path = Self::default_config_path()?;
        self.save_to_file(&path)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> NrResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| NrError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    ///
    /// - Linux: `~/.config/node-red-admin/config.toml`
    /// - macOS: `~/Library/Application Support/node-red-admin/config.toml`
    /// - Windows: `%APPDATA%/node-red-admin/config.toml`
    pub fn default_config_path() -> NrResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| NrError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::APP_NAME).join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> NrResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let base = dirs::data_dir()
                .ok_or_else(|| NrError::Config("could not determine data directory".into()))?;
            Ok(base.join(constants::APP_NAME).join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Sanitize and normalize a server address.
    ///
    /// Strips whitespace and surrounding quotes, adds `http://` when no
    /// scheme is given, and removes trailing slashes.
    pub fn sanitize_server_address(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
