//! Check registry and capability requirements
//!
//! Each check may need a capability-scoped client in addition to the base
//! repository client. The set of clients to acquire is the union of the
//! capabilities required by the enabled checks.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DepDiffError, Result};

/// External data source a check depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Fuzzing-status service (OSS-Fuzz)
    Fuzzing,
    /// Best-practices badge service
    BestPractices,
    /// Vulnerability database
    Vulnerabilities,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Fuzzing => write!(f, "fuzzing"),
            Capability::BestPractices => write!(f, "best-practices"),
            Capability::Vulnerabilities => write!(f, "vulnerabilities"),
        }
    }
}

/// Set of capabilities to acquire clients for
pub type CapabilitySet = BTreeSet<Capability>;

/// A registered check and the capability it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSpec {
    pub name: &'static str,
    pub capability: Option<Capability>,
}

const fn check(name: &'static str) -> CheckSpec {
    CheckSpec {
        name,
        capability: None,
    }
}

const fn check_with(name: &'static str, capability: Capability) -> CheckSpec {
    CheckSpec {
        name,
        capability: Some(capability),
    }
}

/// Every check the suite knows about
pub const KNOWN_CHECKS: &[CheckSpec] = &[
    check("Binary-Artifacts"),
    check("Branch-Protection"),
    check("CI-Tests"),
    check_with("CII-Best-Practices", Capability::BestPractices),
    check("Code-Review"),
    check("Contributors"),
    check("Dangerous-Workflow"),
    check("Dependency-Update-Tool"),
    check_with("Fuzzing", Capability::Fuzzing),
    check("License"),
    check("Maintained"),
    check("Packaging"),
    check("Pinned-Dependencies"),
    check("SAST"),
    check("Security-Policy"),
    check("Signed-Releases"),
    check("Token-Permissions"),
    check_with("Vulnerabilities", Capability::Vulnerabilities),
    check("Webhooks"),
];

/// Look up a registered check by name, ignoring case
pub fn lookup(name: &str) -> Option<&'static CheckSpec> {
    KNOWN_CHECKS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}

/// Validated set of checks to run, in registry spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledChecks {
    checks: Vec<&'static CheckSpec>,
}

impl EnabledChecks {
    /// Every registered check
    pub fn all() -> Self {
        Self {
            checks: KNOWN_CHECKS.iter().collect(),
        }
    }

    /// Resolve requested check names; an empty request enables every check
    pub fn resolve<S: AsRef<str>>(requested: &[S]) -> Result<Self> {
        if requested.is_empty() {
            return Ok(Self::all());
        }
        let mut checks: Vec<&'static CheckSpec> = Vec::with_capacity(requested.len());
        for name in requested {
            let name = name.as_ref();
            let spec = lookup(name).ok_or_else(|| DepDiffError::unknown_check(name))?;
            if !checks.contains(&spec) {
                checks.push(spec);
            }
        }
        Ok(Self { checks })
    }

    /// Check names, in registry spelling
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|spec| spec.name)
    }

    /// Whether a check is enabled, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.checks
            .iter()
            .any(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Minimal capability set for the enabled checks
    pub fn capabilities(&self) -> CapabilitySet {
        self.checks.iter().filter_map(|spec| spec.capability).collect()
    }
}
