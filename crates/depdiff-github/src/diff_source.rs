//! GitHub dependency-graph diff source
//!
//! Wraps `GET /repos/{owner}/{repo}/dependency-graph/compare/{base}...{head}`,
//! which returns the added and removed dependency records between two revisions.

use std::time::Duration;

use async_trait::async_trait;
use depdiff_core::{DiffFetchError, DiffSource, RawDependency, RepoId};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::Result;
use crate::http::{base_url, build_client, error_message};

/// Public GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// Diff source backed by the GitHub dependency graph
#[derive(Debug, Clone)]
pub struct GitHubDiffSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubDiffSource {
    /// Create a new diff source against `api_url`
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_url: base_url(api_url, "GitHub API")?,
            token: None,
        })
    }

    /// Authenticate requests with a personal access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Compare endpoint URL for two revisions
    pub fn compare_url(&self, repo: &RepoId, base: &str, head: &str) -> String {
        format!(
            "{}/repos/{}/{}/dependency-graph/compare/{}...{}",
            self.api_url,
            repo.owner(),
            repo.name(),
            base,
            head
        )
    }
}

#[async_trait]
impl DiffSource for GitHubDiffSource {
    async fn fetch(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> std::result::Result<Vec<RawDependency>, DiffFetchError> {
        let url = self.compare_url(repo, base, head);
        debug!(url = %url, "Fetching dependency diff");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DiffFetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!(repo = %repo, status = status.as_u16(), message = %message, "Dependency diff request failed");
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    DiffFetchError::RevisionNotFound(format!("{}...{}: {}", base, head, message))
                }
                _ => DiffFetchError::Status {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let records: Vec<RawDependency> = response
            .json()
            .await
            .map_err(|e| DiffFetchError::Decode(e.to_string()))?;
        debug!(repo = %repo, records = records.len(), "Fetched dependency diff");
        Ok(records)
    }
}
