//! Data model for dependency diffs and their check results

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DepDiffError, Result};

/// Side of a raw diff record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffSide {
    /// Present at head, absent at base
    Added,
    /// Present at base, absent at head
    Removed,
}

/// Change classification of a reconciled dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Newly added dependency
    Added,
    /// Dependency whose version changed
    Updated,
    /// Dependency no longer present
    Removed,
}

impl ChangeType {
    /// Lowercase label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Updated => "updated",
            ChangeType::Removed => "removed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = DepDiffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "added" => Ok(ChangeType::Added),
            "updated" => Ok(ChangeType::Updated),
            "removed" => Ok(ChangeType::Removed),
            other => Err(DepDiffError::invalid_input(format!(
                "unknown change type '{}', expected added, updated or removed",
                other
            ))),
        }
    }
}

/// Dependency scope as reported by the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Runtime,
    Development,
    #[serde(other)]
    Unknown,
}

/// Known advisory affecting a dependency version
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Advisory severity (low, moderate, high, critical)
    #[serde(default)]
    pub severity: String,
    /// GitHub advisory identifier
    #[serde(default)]
    pub advisory_ghsa_id: String,
    /// One-line advisory summary
    #[serde(default)]
    pub advisory_summary: String,
    /// Advisory URL
    #[serde(default)]
    pub advisory_url: String,
}

/// Unreconciled dependency change record, as produced by a diff source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDependency {
    /// Which side of the diff this record belongs to
    pub change_type: DiffSide,
    /// Package name
    pub name: String,
    /// Source-native ecosystem identifier
    #[serde(default)]
    pub ecosystem: Option<String>,
    /// Package version
    #[serde(default)]
    pub version: Option<String>,
    /// Manifest file declaring the dependency
    #[serde(default)]
    pub manifest: Option<String>,
    /// Package URL (purl)
    #[serde(default)]
    pub package_url: Option<String>,
    /// SPDX license expression
    #[serde(default)]
    pub license: Option<String>,
    /// Source repository URL
    #[serde(default)]
    pub source_repository_url: Option<String>,
    /// Dependency scope
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    /// Known vulnerabilities of this version
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

impl RawDependency {
    fn on_side(change_type: DiffSide, name: impl Into<String>) -> Self {
        Self {
            change_type,
            name: name.into(),
            ecosystem: None,
            version: None,
            manifest: None,
            package_url: None,
            license: None,
            source_repository_url: None,
            scope: None,
            vulnerabilities: Vec::new(),
        }
    }

    /// Create a record on the added side
    pub fn added(name: impl Into<String>) -> Self {
        Self::on_side(DiffSide::Added, name)
    }

    /// Create a record on the removed side
    pub fn removed(name: impl Into<String>) -> Self {
        Self::on_side(DiffSide::Removed, name)
    }

    /// Set the ecosystem
    pub fn with_ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into());
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the manifest path
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// Set the package URL
    pub fn with_package_url(mut self, url: impl Into<String>) -> Self {
        self.package_url = Some(url.into());
        self
    }

    /// Set the source repository URL
    pub fn with_source_repository(mut self, url: impl Into<String>) -> Self {
        self.source_repository_url = Some(url.into());
        self
    }

    /// Add a vulnerability
    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }
}

/// Dependency after pairing the added and removed sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledDependency {
    pub name: String,
    pub change_type: ChangeType,
    pub ecosystem: Option<String>,
    /// Current version; the new one for updates
    pub version: Option<String>,
    /// Version before the change, only set for updates
    pub previous_version: Option<String>,
    pub package_url: Option<String>,
    pub source_repository: Option<String>,
    pub manifest_path: Option<String>,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl ReconciledDependency {
    /// Build an added or removed entry from a single record
    pub fn from_record(record: RawDependency, change_type: ChangeType) -> Self {
        Self {
            name: record.name,
            change_type,
            ecosystem: record.ecosystem,
            version: record.version,
            previous_version: None,
            package_url: record.package_url,
            source_repository: record.source_repository_url,
            manifest_path: record.manifest,
            vulnerabilities: record.vulnerabilities,
        }
    }

    /// Build an updated entry; the added record is the currently effective state
    pub fn updated(added: RawDependency, removed: RawDependency) -> Self {
        let mut dep = Self::from_record(added, ChangeType::Updated);
        dep.previous_version = removed.version;
        dep
    }

    /// Source repository URL, if present and non-empty
    pub fn source_repository_url(&self) -> Option<&str> {
        self.source_repository
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Score of a single risk check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckScore {
    pub name: String,
    /// Score from 0 to 10, or -1 when the check was inconclusive
    pub score: i32,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Successful risk-check result bundle for one repository
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBundle {
    /// Repository the checks ran against
    pub repo: String,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub scorecard_version: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Aggregate score
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub checks: Vec<CheckScore>,
}

/// Kind of a per-dependency failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    CheckExecution,
}

/// Structured per-dependency failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CheckFailure {
    /// Create a check execution failure
    pub fn check_execution(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::CheckExecution,
            message: message.into(),
        }
    }
}

/// Outcome of the check run for one dependency
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckOutcome {
    /// Checks were not executed for this dependency
    #[default]
    Empty,
    /// Checks ran and produced a result bundle
    #[serde(rename = "result")]
    Success(CheckBundle),
    /// Checks ran and failed
    #[serde(rename = "error")]
    Failed(CheckFailure),
}

impl CheckOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, CheckOutcome::Empty)
    }

    pub fn bundle(&self) -> Option<&CheckBundle> {
        match self {
            CheckOutcome::Success(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            CheckOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Final output unit: a dependency change merged with its check outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub change_type: ChangeType,
    pub package_url: Option<String>,
    pub source_repository: Option<String>,
    pub manifest_path: Option<String>,
    pub ecosystem: Option<String>,
    pub version: Option<String>,
    pub previous_version: Option<String>,
    pub name: String,
    /// Known advisories affecting the current version
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(rename = "checkOutcome")]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Result for a dependency whose checks have not run
    pub fn pending(dep: &ReconciledDependency) -> Self {
        Self {
            change_type: dep.change_type,
            package_url: dep.package_url.clone(),
            source_repository: dep.source_repository.clone(),
            manifest_path: dep.manifest_path.clone(),
            ecosystem: dep.ecosystem.clone(),
            version: dep.version.clone(),
            previous_version: dep.previous_version.clone(),
            name: dep.name.clone(),
            vulnerabilities: dep.vulnerabilities.clone(),
            outcome: CheckOutcome::Empty,
        }
    }

    /// Attach an outcome
    pub fn with_outcome(mut self, outcome: CheckOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

/// `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Parse an `owner/name` identifier; exactly two non-empty components
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                name: (*name).to_string(),
            }),
            _ => Err(DepDiffError::invalid_input(format!(
                "repository '{}' must have the form owner/name",
                input
            ))),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parameters of one dependency diff invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    /// Repository in `owner/name` form
    pub repo: String,
    /// Base revision (SHA or branch)
    pub base: String,
    /// Head revision (SHA or branch)
    pub head: String,
    /// Enabled check names; empty runs every known check
    pub checks: Vec<String>,
    /// Change types to run checks for; empty means no restriction
    pub change_types: BTreeSet<ChangeType>,
}

impl DiffRequest {
    /// Create a new request with no check or change type restriction
    pub fn new(repo: impl Into<String>, base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            base: base.into(),
            head: head.into(),
            checks: Vec::new(),
            change_types: BTreeSet::new(),
        }
    }

    /// Restrict the checks to run
    pub fn with_checks<I, S>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = checks.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the change types to run checks for
    pub fn with_change_types(mut self, change_types: impl IntoIterator<Item = ChangeType>) -> Self {
        self.change_types = change_types.into_iter().collect();
        self
    }
}

/// Per-classification counts over a set of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSummary {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Results whose checks failed
    pub failed: usize,
}

impl ChangeSummary {
    /// Count results by change type and failure
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.change_type {
                ChangeType::Added => summary.added += 1,
                ChangeType::Updated => summary.updated += 1,
                ChangeType::Removed => summary.removed += 1,
            }
            if result.outcome.failure().is_some() {
                summary.failed += 1;
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.added + self.updated + self.removed
    }
}
