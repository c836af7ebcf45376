//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Filtering follows `RUST_LOG` (default `info`). `LOG_FORMAT=json` switches
/// to one JSON object per line. Records emitted through the `log` macros are
/// forwarded to the same subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
