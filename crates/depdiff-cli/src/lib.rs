//! depdiff command line
//!
//! Loads configuration, builds the GitHub and Scorecard adapters, runs the
//! dependency diff and renders the report.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod runner;

pub use args::{Cli, OutputFormat};
pub use config::{ConfigManager, DepDiffConfig};
pub use error::{CliError, Result};
