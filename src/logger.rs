//! Diagnostic logging for the command line tool
//!
//! Events go to stderr as `<uptime> LEVEL target: message`. `RUST_LOG`
//! overrides the level chosen from the verbosity flag.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter directive for the given verbosity
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

/// Install the global subscriber
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::Uptime::default())
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}
