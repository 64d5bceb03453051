//! Tracing subscriber setup for host binaries.
//!
//! The library itself only emits `tracing` events; a hosting server calls
//! [`init`] once at startup to get formatted output honoring `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, defaulting to `info` when `RUST_LOG`
/// is unset or unparsable.
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
