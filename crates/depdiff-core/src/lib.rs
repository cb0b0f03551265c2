//! Dependency diff core
//!
//! This crate computes the dependency changes between two revisions of a project
//! and merges them with supply-chain risk-check results:
//! - Diff reconciliation into added, updated and removed dependencies
//! - Ecosystem name normalization
//! - Fault-isolated check orchestration with cancellation
//!
//! Fetching diffs and running checks are delegated to [`DiffSource`] and
//! [`CheckerSuite`] implementations.

pub mod capability;
pub mod collaborators;
pub mod ecosystem;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod pipeline;
pub mod reconcile;

pub use capability::{Capability, CapabilitySet, CheckSpec, EnabledChecks, KNOWN_CHECKS};
pub use collaborators::{CheckerSuite, DiffSource};
pub use error::{
    CheckExecutionError, ClientAcquisitionError, DepDiffError, DiffFetchError, Result,
};
pub use models::{
    ChangeSummary, ChangeType, CheckBundle, CheckFailure, CheckOutcome, CheckResult, CheckScore,
    DependencyScope, DiffRequest, DiffSide, FailureKind, RawDependency, ReconciledDependency,
    RepoId, Vulnerability,
};
pub use orchestrator::CheckOrchestrator;
pub use pipeline::DependencyDiff;
pub use reconcile::reconcile;

pub use tokio_util::sync::CancellationToken;
