//! Tracing subscriber setup for the sample binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set: show every request/response exchange.
pub const DEFAULT_DIRECTIVE: &str = "debug";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a fmt subscriber writing to stderr, so stdout only carries the sample's output.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
