//! Tracing subscriber setup

use crate::constants::logging::{DEFAULT_FILTER, VERBOSE_FILTER};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to the default level
///
/// `--verbose` overrides `RUST_LOG`.
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber; logs go to stderr so stdout stays clean
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
