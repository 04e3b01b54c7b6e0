//! Configuration for dynamic address metadata
//!
//! ```toml
//! service_url = "https://chromium-i18n.appspot.com/ssl-address/data"
//! timeout_secs = 10
//! failure_ttl_secs = 0
//! coalesce_requests = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public address-format service
pub const DEFAULT_SERVICE_URL: &str = "https://chromium-i18n.appspot.com/ssl-address/data";

/// Error loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),
    #[error("Invalid config: {0}")]
    ParseError(String),
}

/// Configuration for the fetcher and the HTTP source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    /// Base URL of the address-format service
    pub service_url: String,

    /// Upper bound for one outbound request, in seconds (0 = no bound)
    pub timeout_secs: u64,

    /// How long a failed fetch is remembered, in seconds.
    /// 0 means every call after a failure tries again.
    pub failure_ttl_secs: u64,

    /// Share one in-flight request between concurrent callers for a country
    pub coalesce_requests: bool,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: 10,
            failure_ttl_secs: 0,
            coalesce_requests: true,
        }
    }
}

impl AddressConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AddressConfigBuilder {
        AddressConfigBuilder::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn failure_ttl(&self) -> Duration {
        Duration::from_secs(self.failure_ttl_secs)
    }
}

/// Builder for AddressConfig
#[derive(Debug, Default)]
pub struct AddressConfigBuilder {
    config: AddressConfig,
}

impl AddressConfigBuilder {
    /// Set the service base URL
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_url = url.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set how long failures are remembered
    pub fn failure_ttl_secs(mut self, secs: u64) -> Self {
        self.config.failure_ttl_secs = secs;
        self
    }

    /// Enable or disable request coalescing
    pub fn coalesce_requests(mut self, enabled: bool) -> Self {
        self.config.coalesce_requests = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AddressConfig {
        self.config
    }
}
