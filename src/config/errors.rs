//! Configuration error types

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    /// File is not valid JSON for `Config`
    #[error("Invalid config JSON: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "NOTES_CONFIG_READ",
            ConfigError::Parse(_) => "NOTES_CONFIG_PARSE",
            ConfigError::Invalid { .. } => "NOTES_CONFIG_INVALID",
        }
    }
}
