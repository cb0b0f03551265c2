//! CLI error types

use depdiff_core::DepDiffError;
use depdiff_github::AdapterError;
use thiserror::Error;

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Loaded configuration is invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP adapter could not be built
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// The dependency diff failed
    #[error(transparent)]
    DepDiff(#[from] DepDiffError),

    /// Report could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// User-facing message with a hint where one helps
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(e) => format!(
                "Configuration error: {}\n\nCheck the config file and DEPDIFF_* environment variables.",
                e
            ),
            CliError::Validation(msg) => format!(
                "Invalid configuration: {}\n\nCheck the config file and DEPDIFF_* environment variables.",
                msg
            ),
            CliError::DepDiff(DepDiffError::UnknownCheck(name)) => format!(
                "Unknown check '{}'.\n\nKnown checks: {}",
                name,
                depdiff_core::KNOWN_CHECKS
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            CliError::DepDiff(DepDiffError::UnknownEcosystem(name)) => format!(
                "Unknown ecosystem '{}'.\n\nSupported ecosystems: {}",
                name,
                depdiff_core::ecosystem::supported()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            CliError::DepDiff(DepDiffError::DiffFetch(e)) => format!(
                "Fetching the dependency diff failed: {}\n\nSet GITHUB_TOKEN if the repository is private or rate limited.",
                e
            ),
            other => other.to_string(),
        }
    }
}
