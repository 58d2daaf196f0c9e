//! Logging configuration for Parley.
//!
//! Logs go to stderr so streamed model output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with `RUST_LOG`-style filtering.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
