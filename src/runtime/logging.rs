use tracing_subscriber::EnvFilter;

use super::progress;

/// Default directive when RUST_LOG is unset.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. Logs go to stderr, around any progress bar,
/// so stdout stays clean for `lrcput config`.
pub fn init(verbose: bool, quiet: bool) {
    let level = default_level(verbose, quiet);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(progress::log_writer)
        .with_target(false)
        .init();
}
