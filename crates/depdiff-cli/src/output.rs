//! Report rendering

use std::fmt::Write;

use depdiff_core::{ChangeSummary, ChangeType, CheckOutcome, CheckResult};

use crate::args::OutputFormat;
use crate::error::Result;

/// Render results in the requested format
pub fn render(results: &[CheckResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results)),
        OutputFormat::Json => render_json(results),
    }
}

/// Pretty-printed JSON array
pub fn render_json(results: &[CheckResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Markdown-like change summary, one paragraph per dependency
pub fn render_text(results: &[CheckResult]) -> String {
    if results.is_empty() {
        return "No dependency changes".to_string();
    }

    let paragraphs: Vec<String> = results.iter().map(render_paragraph).collect();
    let summary = ChangeSummary::from_results(results);
    format!(
        "{}\n\n{} added, {} updated, {} removed, {} with failed checks",
        paragraphs.join("\n\n"),
        summary.added,
        summary.updated,
        summary.removed,
        summary.failed
    )
}

fn render_paragraph(result: &CheckResult) -> String {
    let ecosystem = result.ecosystem.as_deref().unwrap_or("unknown");
    let version = result.version.as_deref().unwrap_or("?");
    let alert = vulnerable_alert(result).unwrap_or_default();

    let mut out = match result.change_type {
        ChangeType::Added => format!(
            "**`added`** {}{}: {} @ {}",
            alert, ecosystem, result.name, version
        ),
        ChangeType::Updated => format!(
            "**`updated`** {}{}: {} @ {} (**old**) → {} (**new**)",
            alert,
            ecosystem,
            result.name,
            result.previous_version.as_deref().unwrap_or("?"),
            version
        ),
        ChangeType::Removed => {
            format!("~~**`removed`**~~ {}: {} @ {}", ecosystem, result.name, version)
        }
    };

    if let Some(url) = result.package_url.as_deref().filter(|u| !u.is_empty()) {
        let _ = write!(out, "\npkg_url: {}", url);
    }
    if let Some(url) = result.source_repository.as_deref().filter(|u| !u.is_empty()) {
        let _ = write!(out, "\nsrc_url: {}", url);
    }
    if result.change_type != ChangeType::Removed {
        for vuln in &result.vulnerabilities {
            let _ = write!(out, "\nvulnerability: {}", vuln.advisory_ghsa_id);
            if !vuln.severity.is_empty() {
                let _ = write!(out, " ({})", vuln.severity);
            }
            if !vuln.advisory_summary.is_empty() {
                let _ = write!(out, ": {}", vuln.advisory_summary);
            }
            if !vuln.advisory_url.is_empty() {
                let _ = write!(out, " <{}>", vuln.advisory_url);
            }
        }
    }

    match &result.outcome {
        CheckOutcome::Empty => {}
        CheckOutcome::Success(bundle) => {
            match bundle.score {
                Some(score) => {
                    let _ = write!(out, "\nscore: {:.1}", score);
                }
                None => out.push_str("\nscore: n/a"),
            }
            for check in &bundle.checks {
                let _ = write!(out, "\n- {}: {} ({})", check.name, check.score, check.reason);
            }
        }
        CheckOutcome::Failed(failure) => {
            let _ = write!(out, "\nerror: {}", failure.message);
        }
    }
    out
}

/// deps.dev link flagging an added or updated dependency with known advisories
fn vulnerable_alert(result: &CheckResult) -> Option<String> {
    if result.vulnerabilities.is_empty() || result.change_type == ChangeType::Removed {
        return None;
    }
    let segments: Vec<&str> = [
        deps_dev_system(result.ecosystem.as_deref()),
        Some(result.name.as_str()),
        result.version.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();
    Some(format!(
        "[**`vulnerable`**](https://deps.dev/{}) ",
        segments.join("/")
    ))
}

/// deps.dev system segment for a canonical ecosystem
fn deps_dev_system(ecosystem: Option<&str>) -> Option<&'static str> {
    match ecosystem? {
        "Go" | "gomod" => Some("go"),
        "PyPI" | "pip" => Some("pypi"),
        "npm" => Some("npm"),
        "Maven" | "maven" => Some("maven"),
        "crates.io" | "cargo" => Some("cargo"),
        "NuGet" | "nuget" => Some("nuget"),
        _ => None,
    }
}
