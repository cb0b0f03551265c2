//! Logging setup

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str =
    "depdiff=info,depdiff_cli=info,depdiff_core=info,depdiff_github=info";
const VERBOSE_DIRECTIVES: &str =
    "depdiff=debug,depdiff_cli=debug,depdiff_core=debug,depdiff_github=debug";

/// Filter from `RUST_LOG`, falling back to the verbosity flag
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_DIRECTIVES);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber, writing to stderr
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
