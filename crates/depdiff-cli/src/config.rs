//! Configuration loading
//!
//! Sources, lowest precedence first: built-in defaults, the TOML config file,
//! `DEPDIFF_*` environment variables. Command-line flags are merged on top by
//! the runner.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use depdiff_core::ChangeType;
use depdiff_github::{DEFAULT_API_URL, DEFAULT_SCORECARD_URL};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DEPDIFF";

/// Fallback variable for the GitHub token
pub const TOKEN_FALLBACK_VAR: &str = "GITHUB_TOKEN";

/// depdiff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepDiffConfig {
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// Scorecard results API base URL
    pub scorecard_api_url: String,
    /// GitHub token for the dependency graph API
    pub github_token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Checks to run; empty runs every known check
    pub checks: Vec<String>,
    /// Change types to run checks for; empty means all
    pub change_types: Vec<ChangeType>,
}

impl Default for DepDiffConfig {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_API_URL.to_string(),
            scorecard_api_url: DEFAULT_SCORECARD_URL.to_string(),
            github_token: None,
            timeout_secs: 30,
            checks: Vec::new(),
            change_types: Vec::new(),
        }
    }
}

impl DepDiffConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject unusable settings
    pub fn validate(&self) -> Result<()> {
        if self.github_api_url.trim().is_empty() {
            return Err(CliError::validation("github_api_url must not be empty"));
        }
        if self.scorecard_api_url.trim().is_empty() {
            return Err(CliError::validation("scorecard_api_url must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::validation("timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
    /// Variable consulted when no token is configured
    token_var: String,
}

impl ConfigManager {
    /// Create a new configuration manager using the default config path
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
            token_var: TOKEN_FALLBACK_VAR.to_string(),
        }
    }

    /// Override the environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Override the token fallback variable
    pub fn with_token_var(mut self, var: impl Into<String>) -> Self {
        self.token_var = var.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depdiff")
            .join("config.toml")
    }

    /// Load and validate the configuration
    pub fn load(&self) -> Result<DepDiffConfig> {
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("checks")
                    .with_list_parse_key("change_types"),
            );

        let mut config: DepDiffConfig = builder.build()?.try_deserialize()?;
        if config.github_token.is_none() {
            config.github_token = std::env::var(&self.token_var)
                .ok()
                .filter(|token| !token.trim().is_empty());
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
