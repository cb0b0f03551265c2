//! End-to-end dependency diff invocation

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::capability::EnabledChecks;
use crate::collaborators::{CheckerSuite, DiffSource};
use crate::ecosystem;
use crate::error::Result;
use crate::models::{CheckResult, DiffRequest, RepoId};
use crate::orchestrator::{until_cancelled, CheckOrchestrator};
use crate::reconcile::reconcile;

/// Dependency diff between two revisions, with check results per dependency
pub struct DependencyDiff<D, S> {
    source: D,
    suite: S,
}

impl<D: DiffSource, S: CheckerSuite> DependencyDiff<D, S> {
    /// Create a new dependency diff over a diff source and a checker suite
    pub fn new(source: D, suite: S) -> Self {
        Self { source, suite }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn suite(&self) -> &S {
        &self.suite
    }

    /// Fetch, reconcile, normalize and check the dependency changes in `request`.
    ///
    /// Returns one result per reconciled dependency, sorted by name, or a single
    /// invocation-level error. Partial results are never returned.
    pub async fn results(
        &self,
        request: &DiffRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<CheckResult>> {
        let repo = RepoId::parse(&request.repo)?;
        let checks = EnabledChecks::resolve(request.checks.as_slice())?;

        info!(
            repo = %repo,
            base = %request.base,
            head = %request.head,
            checks = checks.len(),
            "Computing dependency diff"
        );

        let raw = until_cancelled(
            cancel,
            self.source.fetch(&repo, &request.base, &request.head),
        )
        .await??;

        let reconciled = ecosystem::normalize(reconcile(raw))?;
        info!(dependencies = reconciled.len(), "Reconciled dependency changes");

        CheckOrchestrator::new(&self.suite, checks, request.change_types.clone())
            .run(&reconciled, cancel)
            .await
    }
}
