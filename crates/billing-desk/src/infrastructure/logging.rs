//! Structured logging setup.
//!
//! The host calls [`init_logging`] once at startup with the level from
//! `[general] log_level`.  `RUST_LOG`, when set, overrides that level.

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` if set and valid, else `level`, else `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept.
pub fn init_logging(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .try_init()
        .is_ok()
}
