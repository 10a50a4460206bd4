//! Configuration for schema loading and validation

use serde::{Deserialize, Serialize};

/// Default maximum schema document size (10MB)
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for schema loading and validation
///
/// The defaults give the baseline contract: referenced tables must exist, but
/// referenced columns and foreign-key cycles are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Require foreign keys to name an existing primary-key or unique column
    pub check_referenced_columns: bool,

    /// Reject foreign keys that form a cycle between tables
    pub detect_cycles: bool,

    /// Maximum number of bytes read from a schema document
    pub max_document_bytes: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_referenced_columns: false,
            detect_cycles: false,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl ValidationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Parse a configuration from TOML
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration from a TOML file
    #[cfg(feature = "config-file")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}

/// Errors while loading a configuration file
#[cfg(feature = "config-file")]
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("invalid config: {0}")]
    Parse(String),
}

/// Builder for ValidationConfig
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Enable or disable referenced-column checks
    pub fn check_referenced_columns(mut self, check: bool) -> Self {
        self.config.check_referenced_columns = check;
        self
    }

    /// Enable or disable foreign-key cycle detection
    pub fn detect_cycles(mut self, detect: bool) -> Self {
        self.config.detect_cycles = detect;
        self
    }

    /// Set the maximum document size in bytes (at least 1)
    pub fn max_document_bytes(mut self, bytes: u64) -> Self {
        self.config.max_document_bytes = bytes.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}
