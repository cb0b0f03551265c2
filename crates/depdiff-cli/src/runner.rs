//! Wires configuration and arguments into a dependency diff run

use depdiff_core::{CancellationToken, CheckResult, DependencyDiff, DiffRequest};
use depdiff_github::{GitHubDiffSource, ScorecardApiSuite};
use tracing::{debug, info};

use crate::args::Cli;
use crate::config::DepDiffConfig;
use crate::error::Result;
use crate::output;

/// Dependency diff over the GitHub dependency graph and published Scorecard results
pub type GitHubDependencyDiff = DependencyDiff<GitHubDiffSource, ScorecardApiSuite>;

/// Build the request, letting non-empty flags override configured lists
pub fn build_request(cli: &Cli, config: &DepDiffConfig) -> DiffRequest {
    let checks = if cli.checks.is_empty() {
        &config.checks
    } else {
        &cli.checks
    };
    let change_types = if cli.change_types.is_empty() {
        &config.change_types
    } else {
        &cli.change_types
    };

    DiffRequest::new(cli.repo.trim(), cli.base.trim(), cli.head.trim())
        .with_checks(checks.iter().map(|c| c.trim()).filter(|c| !c.is_empty()))
        .with_change_types(change_types.iter().copied())
}

/// Build the HTTP-backed dependency diff from configuration
pub fn build_diff(config: &DepDiffConfig) -> Result<GitHubDependencyDiff> {
    let mut source = GitHubDiffSource::new(&config.github_api_url, config.timeout())?;
    if let Some(token) = &config.github_token {
        source = source.with_token(token.clone());
    } else {
        debug!("No GitHub token configured, using unauthenticated requests");
    }
    let suite = ScorecardApiSuite::new(&config.scorecard_api_url, config.timeout())?;
    Ok(DependencyDiff::new(source, suite))
}

/// Run a request against `diff`
pub async fn execute(
    diff: &GitHubDependencyDiff,
    request: &DiffRequest,
    cancel: &CancellationToken,
) -> Result<Vec<CheckResult>> {
    let results = diff.results(request, cancel).await?;
    info!(results = results.len(), "Dependency diff complete");
    Ok(results)
}

/// Run the command line invocation and render the report
pub async fn run(cli: &Cli, config: &DepDiffConfig, cancel: &CancellationToken) -> Result<String> {
    let request = build_request(cli, config);
    let diff = build_diff(config)?;
    let results = execute(&diff, &request, cancel).await?;
    output::render(&results, cli.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use depdiff_core::ChangeType;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["depdiff", "--repo", " a/b ", "--base", "v1", "--head", "v2"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_flags_override_config_lists() {
        let config = DepDiffConfig {
            checks: vec!["Maintained".to_string()],
            change_types: vec![ChangeType::Removed],
            ..Default::default()
        };

        let request = build_request(&cli(&["--checks", "Fuzzing", "--change-types", "added"]), &config);

        assert_eq!(request.repo, "a/b");
        assert_eq!(request.checks, vec!["Fuzzing".to_string()]);
        assert!(request.change_types.contains(&ChangeType::Added));
        assert_eq!(request.change_types.len(), 1);
    }

    #[test]
    fn test_config_lists_used_without_flags() {
        let config = DepDiffConfig {
            checks: vec!["Maintained".to_string(), " ".to_string()],
            change_types: vec![ChangeType::Removed, ChangeType::Updated],
            ..Default::default()
        };

        let request = build_request(&cli(&[]), &config);

        assert_eq!(request.checks, vec!["Maintained".to_string()]);
        assert_eq!(request.change_types.len(), 2);
    }

    #[test]
    fn test_build_diff_rejects_zero_timeout() {
        let config = DepDiffConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(build_diff(&config).is_err());
    }
}
