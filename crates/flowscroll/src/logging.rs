#![forbid(unsafe_code)]

//! JSON log output for hosts that don't install their own subscriber.

use tracing_subscriber::EnvFilter;

/// Install a global JSON subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set; the existing one
/// is left in place.
pub fn init_json_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("json logging initialized");
    }
    installed
}
