//! Tracing setup for the CLI and library consumers that want it.
//!
//! Library code only ever emits `tracing` events (see
//! [`crate::matchers::load_suffix_rules`]'s `warn!` on exception rules); it
//! never installs a subscriber itself. This module is the opt-in
//! initializer the binary calls at startup.

use tracing_subscriber::EnvFilter;

/// Install a `tracing-subscriber` formatter reading `RUST_LOG`, defaulting
/// to `info` when unset. Safe to call more than once; later calls are
/// no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
