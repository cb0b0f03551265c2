//! Collaborator traits
//!
//! The core never fetches diffs or runs checks itself. It drives these two
//! seams, which the adapter crates (and test doubles) implement.

use async_trait::async_trait;

use crate::capability::{CapabilitySet, EnabledChecks};
use crate::error::{CheckExecutionError, ClientAcquisitionError, DiffFetchError};
use crate::models::{CheckBundle, RawDependency, RepoId};

/// Supplies raw dependency change records between two revisions
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Fetch the raw added/removed records for `repo` between `base` and `head`
    async fn fetch(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Vec<RawDependency>, DiffFetchError>;
}

/// Runs named risk checks against a dependency's source repository
#[async_trait]
pub trait CheckerSuite: Send + Sync {
    /// Repository handle plus the capability-scoped clients acquired for it
    type Clients: Send + Sync;

    /// Acquire the repository handle and the clients for `capabilities` only
    async fn acquire_clients(
        &self,
        source_repository: &str,
        capabilities: &CapabilitySet,
    ) -> Result<Self::Clients, ClientAcquisitionError>;

    /// Run the enabled checks with previously acquired clients
    async fn run(
        &self,
        clients: &Self::Clients,
        checks: &EnabledChecks,
    ) -> Result<CheckBundle, CheckExecutionError>;
}
