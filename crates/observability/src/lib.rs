//! Tracing/logging setup shared by binaries and test harnesses.
//!
//! The strategy crates emit `tracing` events but never install a subscriber;
//! whoever owns the process calls [`init`] once.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: quiet overall, strategy events
/// visible.
const DEFAULT_FILTER: &str = "info,palisade_strategies=debug";

/// Initialize process-wide tracing/logging.
///
/// JSON lines with flattened fields, filterable via `RUST_LOG`. Safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_target(false)
        .try_init();
}
