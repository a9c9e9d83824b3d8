//! Tracing subscriber initialization
//!
//! `RUST_LOG` wins over the configured default filter. Initializing twice is
//! harmless: the second call leaves the installed subscriber in place.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set and valid, otherwise `default`
pub fn build_env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to stderr
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(build_env_filter(default_filter))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
