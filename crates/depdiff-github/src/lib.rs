//! GitHub and Scorecard adapters for depdiff
//!
//! - [`GitHubDiffSource`]: dependency changes from the GitHub dependency graph
//! - [`ScorecardApiSuite`]: risk-check results published by OpenSSF Scorecard

pub mod diff_source;
pub mod error;
mod http;
pub mod repo;
pub mod scorecard;

pub use diff_source::{GitHubDiffSource, DEFAULT_API_URL};
pub use error::AdapterError;
pub use repo::RepoHandle;
pub use scorecard::{ScorecardApiSuite, ScorecardClients, DEFAULT_SCORECARD_URL};
