//! Check orchestration
//!
//! Runs the checker suite for each eligible dependency, one at a time and in
//! order. Failures are split in two tiers:
//! - client acquisition failures end the invocation, discarding earlier results
//! - check execution failures become that dependency's outcome and the batch goes on

use std::collections::BTreeSet;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::capability::{CapabilitySet, EnabledChecks};
use crate::collaborators::CheckerSuite;
use crate::error::{DepDiffError, Result};
use crate::models::{
    ChangeType, CheckFailure, CheckOutcome, CheckResult, ReconciledDependency,
};

/// Await `fut` unless `cancel` fires first
///
/// # Examples
///
/// ```
/// use depdiff_core::orchestrator::until_cancelled;
/// use depdiff_core::{CancellationToken, DepDiffError};
///
/// # tokio_test::block_on(async {
/// let cancel = CancellationToken::new();
/// assert_eq!(until_cancelled(&cancel, async { 7 }).await.unwrap(), 7);
///
/// cancel.cancel();
/// let err = until_cancelled(&cancel, async { 7 }).await.unwrap_err();
/// assert!(matches!(err, DepDiffError::Cancelled));
/// # });
/// ```
pub async fn until_cancelled<F>(cancel: &CancellationToken, fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(DepDiffError::Cancelled),
        output = fut => Ok(output),
    }
}

/// Runs checks over an ordered batch of reconciled dependencies
pub struct CheckOrchestrator<'a, S: CheckerSuite> {
    suite: &'a S,
    checks: EnabledChecks,
    capabilities: CapabilitySet,
    change_types: BTreeSet<ChangeType>,
}

impl<'a, S: CheckerSuite> CheckOrchestrator<'a, S> {
    /// Create an orchestrator; an empty `change_types` set runs every change type
    pub fn new(suite: &'a S, checks: EnabledChecks, change_types: BTreeSet<ChangeType>) -> Self {
        let capabilities = checks.capabilities();
        Self {
            suite,
            checks,
            capabilities,
            change_types,
        }
    }

    /// Capabilities acquired for every executed dependency
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Whether checks should run for `dep`
    pub fn is_eligible(&self, dep: &ReconciledDependency) -> bool {
        dep.source_repository_url().is_some()
            && (self.change_types.is_empty() || self.change_types.contains(&dep.change_type))
    }

    /// Produce exactly one result per dependency, in input order
    pub async fn run(
        &self,
        deps: &[ReconciledDependency],
        cancel: &CancellationToken,
    ) -> Result<Vec<CheckResult>> {
        let mut results = Vec::with_capacity(deps.len());
        let mut executed = 0usize;

        for dep in deps {
            if cancel.is_cancelled() {
                return Err(DepDiffError::Cancelled);
            }

            let result = CheckResult::pending(dep);
            let outcome = match dep.source_repository_url() {
                Some(url) if self.is_eligible(dep) => {
                    executed += 1;
                    self.check_one(dep, url, cancel).await?
                }
                _ => {
                    debug!(dependency = %dep.name, change_type = %dep.change_type, "Skipping checks");
                    CheckOutcome::Empty
                }
            };
            results.push(result.with_outcome(outcome));
        }

        info!(
            total = results.len(),
            executed,
            "Finished running dependency checks"
        );
        Ok(results)
    }

    async fn check_one(
        &self,
        dep: &ReconciledDependency,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<CheckOutcome> {
        debug!(dependency = %dep.name, repository = %url, "Acquiring clients");
        let clients = until_cancelled(cancel, self.suite.acquire_clients(url, &self.capabilities))
            .await?
            .map_err(|source| DepDiffError::ClientAcquisition {
                dependency: dep.name.clone(),
                source,
            })?;

        match until_cancelled(cancel, self.suite.run(&clients, &self.checks)).await? {
            Ok(bundle) => Ok(CheckOutcome::Success(bundle)),
            Err(e) => {
                error!(dependency = %dep.name, error = %e, "Running checks failed");
                Ok(CheckOutcome::Failed(CheckFailure::check_execution(format!(
                    "running checks failed for {}: {}",
                    dep.name, e
                ))))
            }
        }
    }
}
