//! Logging utilities.
//!
//! Library code emits `tracing` events at the FFI boundary (dataset
//! open/create/close, skipped unsupported resources); binaries call
//! [`init_tracing`] once at startup to surface them.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with the given default log level.
/// `RUST_LOG` overrides the default when set.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
