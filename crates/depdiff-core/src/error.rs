//! Error types for dependency diff invocations
//!
//! Errors come in two tiers. [`DepDiffError`] is fatal and ends the whole
//! invocation. [`CheckExecutionError`] is scoped to a single dependency and is
//! captured into that dependency's outcome instead of being returned.

use thiserror::Error;

/// Errors reported by a diff source while fetching raw dependency changes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiffFetchError {
    /// One of the revisions could not be resolved
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// The diff source answered with a non-success status
    #[error("diff source returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("malformed diff response: {0}")]
    Decode(String),
}

/// Errors raised while acquiring the repository handle and clients for a dependency
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientAcquisitionError {
    /// The source repository URL does not name a supported repository
    #[error("unsupported repository url: {0}")]
    UnsupportedRepository(String),

    /// A required client could not be created
    #[error("client unavailable: {0}")]
    Unavailable(String),
}

impl ClientAcquisitionError {
    /// Create a new unsupported repository error
    pub fn unsupported_repository(url: impl Into<String>) -> Self {
        ClientAcquisitionError::UnsupportedRepository(url.into())
    }

    /// Create a new unavailable client error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        ClientAcquisitionError::Unavailable(msg.into())
    }
}

/// Errors raised by a checker suite while running checks for one dependency
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckExecutionError {
    /// The results service answered with a non-success status
    #[error("results service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure
    #[error("network error: {0}")]
    Network(String),

    /// The check results could not be decoded
    #[error("malformed check results: {0}")]
    Decode(String),

    /// Any other failure reported by the suite
    #[error("{0}")]
    Other(String),
}

impl CheckExecutionError {
    /// Create a new generic execution error
    pub fn other(msg: impl Into<String>) -> Self {
        CheckExecutionError::Other(msg.into())
    }
}

/// Invocation-level errors; any of these aborts the whole invocation
#[derive(Debug, Error)]
pub enum DepDiffError {
    /// Malformed caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A requested check is not in the check registry
    #[error("Unknown check: {0}")]
    UnknownCheck(String),

    /// The diff source failed
    #[error("Fetching dependency diff failed: {0}")]
    DiffFetch(#[from] DiffFetchError),

    /// An ecosystem identifier has no canonical mapping
    #[error("Unknown ecosystem: {0}")]
    UnknownEcosystem(String),

    /// Repository handle or clients could not be acquired for a dependency
    #[error("Acquiring clients for {dependency} failed: {source}")]
    ClientAcquisition {
        dependency: String,
        #[source]
        source: ClientAcquisitionError,
    },

    /// The invocation was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,
}

impl DepDiffError {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DepDiffError::InvalidInput(msg.into())
    }

    /// Create a new unknown check error
    pub fn unknown_check(name: impl Into<String>) -> Self {
        DepDiffError::UnknownCheck(name.into())
    }

    /// Create a new unknown ecosystem error
    pub fn unknown_ecosystem(name: impl Into<String>) -> Self {
        DepDiffError::UnknownEcosystem(name.into())
    }

    /// Stable kind label, used when reporting failures
    pub fn kind(&self) -> &'static str {
        match self {
            DepDiffError::InvalidInput(_) => "invalid-input",
            DepDiffError::UnknownCheck(_) => "unknown-check",
            DepDiffError::DiffFetch(_) => "diff-fetch",
            DepDiffError::UnknownEcosystem(_) => "unknown-ecosystem",
            DepDiffError::ClientAcquisition { .. } => "client-acquisition",
            DepDiffError::Cancelled => "cancelled",
        }
    }

    /// Check if this is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DepDiffError::Cancelled)
    }
}

/// Result type for dependency diff operations
pub type Result<T> = std::result::Result<T, DepDiffError>;
