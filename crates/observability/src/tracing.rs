//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON lines with timestamps, filtered
/// via `RUST_LOG` (default `info`).
///
/// Calling this more than once is harmless; later installs are ignored,
/// which keeps test binaries that spin up several servers quiet.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
