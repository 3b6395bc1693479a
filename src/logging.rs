// ==========================================
// Flight Roster - Logging
// ==========================================
// tracing + tracing-subscriber, level from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber
///
/// # Environment
/// - RUST_LOG: filter (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=flight_roster=trace
/// - FLIGHT_ROSTER_LOG_FORMAT=json: one JSON object per event
///
/// # Example
/// ```no_run
/// use flight_roster::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("FLIGHT_ROSTER_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the rendered roster
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Test subscriber at debug level; safe to call repeatedly
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
