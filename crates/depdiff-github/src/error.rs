//! Adapter construction errors

use thiserror::Error;

/// Errors that can occur while building the GitHub and Scorecard adapters
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Invalid adapter configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AdapterError {
    /// Create a new config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        AdapterError::ConfigError(msg.into())
    }
}

/// Result type for adapter construction
pub type Result<T> = std::result::Result<T, AdapterError>;
