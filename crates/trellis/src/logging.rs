//! Logging setup for hosts and tests.
//!
//! The engine itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can call [`init`] to get formatted output on stderr.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Install a global formatted subscriber. The filter is taken from
/// `RUST_LOG`, falling back to `default_filter`. Returns `false` if a global
/// subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes through the test harness capture.
pub fn init_test() {
    // A subscriber installed by an earlier test is fine.
    fmt()
        .with_env_filter(EnvFilter::new("trellis=trace"))
        .with_test_writer()
        .try_init()
        .ok();
}
