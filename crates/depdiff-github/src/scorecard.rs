//! Checker suite backed by published OpenSSF Scorecard results
//!
//! Looks up results computed by the public Scorecard service instead of
//! running checks locally, so acquisition only resolves the repository handle.

use std::time::Duration;

use async_trait::async_trait;
use depdiff_core::{
    CapabilitySet, CheckBundle, CheckExecutionError, CheckScore, CheckerSuite,
    ClientAcquisitionError, EnabledChecks,
};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::http::{base_url, build_client, error_message};
use crate::repo::RepoHandle;

/// Public Scorecard REST API
pub const DEFAULT_SCORECARD_URL: &str = "https://api.securityscorecards.dev";

/// Clients acquired for one dependency.
///
/// Published results already include the fuzzing, best-practices and
/// vulnerability checks, so no capability-scoped client is needed and only the
/// repository handle is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorecardClients {
    repo: RepoHandle,
}

impl ScorecardClients {
    pub fn repo(&self) -> &RepoHandle {
        &self.repo
    }
}

/// Checker suite reading published Scorecard results
#[derive(Debug, Clone)]
pub struct ScorecardApiSuite {
    client: Client,
    api_url: String,
}

impl ScorecardApiSuite {
    /// Create a new suite against `api_url`
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_url: base_url(api_url, "Scorecard API")?,
        })
    }

    /// Results endpoint for a repository
    pub fn project_url(&self, repo: &RepoHandle) -> String {
        format!("{}/projects/{}", self.api_url, repo)
    }
}

#[async_trait]
impl CheckerSuite for ScorecardApiSuite {
    type Clients = ScorecardClients;

    async fn acquire_clients(
        &self,
        source_repository: &str,
        capabilities: &CapabilitySet,
    ) -> std::result::Result<ScorecardClients, ClientAcquisitionError> {
        let repo = RepoHandle::parse(source_repository)?;
        debug!(repository = %repo, capabilities = ?capabilities, "Resolved repository handle");
        Ok(ScorecardClients { repo })
    }

    async fn run(
        &self,
        clients: &ScorecardClients,
        checks: &EnabledChecks,
    ) -> std::result::Result<CheckBundle, CheckExecutionError> {
        let url = self.project_url(&clients.repo);
        debug!(url = %url, "Fetching published check results");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CheckExecutionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckExecutionError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let published: PublishedResult = response
            .json()
            .await
            .map_err(|e| CheckExecutionError::Decode(e.to_string()))?;
        Ok(published.into_bundle(checks))
    }
}

#[derive(Debug, Deserialize)]
struct PublishedResult {
    #[serde(default)]
    date: Option<String>,
    repo: PublishedRepo,
    #[serde(default)]
    scorecard: Option<PublishedScorecard>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    checks: Vec<PublishedCheck>,
}

#[derive(Debug, Deserialize)]
struct PublishedRepo {
    name: String,
    #[serde(default)]
    commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublishedScorecard {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublishedCheck {
    name: String,
    score: i32,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    details: Option<Vec<String>>,
}

impl PublishedResult {
    /// Keep only the enabled checks
    fn into_bundle(self, checks: &EnabledChecks) -> CheckBundle {
        CheckBundle {
            repo: self.repo.name,
            commit: self.repo.commit,
            scorecard_version: self.scorecard.and_then(|s| s.version),
            date: self.date,
            score: self.score,
            checks: self
                .checks
                .into_iter()
                .filter(|check| checks.contains(&check.name))
                .map(|check| CheckScore {
                    name: check.name,
                    score: check.score,
                    reason: check.reason,
                    details: check.details.unwrap_or_default(),
                })
                .collect(),
        }
    }
}
