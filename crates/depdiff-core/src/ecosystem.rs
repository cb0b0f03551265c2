//! Ecosystem naming normalization
//!
//! The dependency graph names ecosystems after package managers (`pip`, `gomod`),
//! while vulnerability databases and check services use OSV ecosystem names
//! (`PyPI`, `Go`). Every identifier the diff source can emit is listed here.

use tracing::warn;

use crate::error::{DepDiffError, Result};
use crate::models::ReconciledDependency;

/// Source-native identifier to canonical (OSV) identifier
const GITHUB_TO_OSV: &[(&str, &str)] = &[
    ("npm", "npm"),
    ("maven", "Maven"),
    ("pip", "PyPI"),
    ("rubygems", "RubyGems"),
    ("composer", "Packagist"),
    ("nuget", "NuGet"),
    ("gomod", "Go"),
    ("cargo", "crates.io"),
    ("rust", "crates.io"),
    ("actions", "GitHub Actions"),
    ("pub", "Pub"),
    ("hex", "Hex"),
    ("swift", "SwiftURL"),
];

/// Map a source-native ecosystem identifier to its canonical identifier
pub fn to_canonical(source: &str) -> Result<&'static str> {
    GITHUB_TO_OSV
        .iter()
        .find(|(native, _)| *native == source)
        .map(|(_, canonical)| *canonical)
        .ok_or_else(|| DepDiffError::unknown_ecosystem(source))
}

/// Source-native identifiers with a canonical mapping
pub fn supported() -> impl Iterator<Item = &'static str> {
    GITHUB_TO_OSV.iter().map(|(native, _)| *native)
}

/// Normalize the ecosystem of every dependency.
///
/// All or nothing: the first unmapped identifier fails the whole batch and no
/// dependency is returned. Dependencies without an ecosystem pass through.
pub fn normalize(deps: Vec<ReconciledDependency>) -> Result<Vec<ReconciledDependency>> {
    deps.into_iter()
        .map(|mut dep| {
            if let Some(native) = dep.ecosystem.as_deref() {
                let canonical = to_canonical(native).map_err(|e| {
                    warn!(dependency = %dep.name, ecosystem = %native, "No canonical ecosystem mapping");
                    e
                })?;
                dep.ecosystem = Some(canonical.to_string());
            }
            Ok(dep)
        })
        .collect()
}
