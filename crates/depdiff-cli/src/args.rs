//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use depdiff_core::ChangeType;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown-like change summary
    Text,
    /// JSON array of check results
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "depdiff")]
#[command(version)]
#[command(about = "Show dependency changes between two revisions with supply-chain risk-check results")]
pub struct Cli {
    /// Repository in owner/name form
    #[arg(short, long)]
    pub repo: String,

    /// Base revision (branch or commit SHA)
    #[arg(long)]
    pub base: String,

    /// Head revision (branch or commit SHA)
    #[arg(long)]
    pub head: String,

    /// Checks to run, comma separated; all known checks when omitted
    #[arg(long, value_delimiter = ',')]
    pub checks: Vec<String>,

    /// Change types to run checks for, comma separated
    #[arg(long, value_delimiter = ',')]
    pub change_types: Vec<ChangeType>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
