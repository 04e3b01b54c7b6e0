//! CLI error types

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Failed to serialize output: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}
