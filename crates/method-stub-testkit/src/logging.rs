//! Tracing setup for test binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that switches test logs to JSON lines
pub const LOG_JSON_ENV_VAR: &str = "METHOD_STUB_LOG_JSON";

const FALLBACK_FILTER: &str = "method_stub=debug";

/// Install a global subscriber writing through the test harness.
///
/// Safe to call from every test: only the first call installs anything.
/// `RUST_LOG` overrides the default `method_stub=debug` filter.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| FALLBACK_FILTER.into());

    let result = if std::env::var_os(LOG_JSON_ENV_VAR).is_some() {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_test_writer()
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };

    // Already initialized by an earlier test in this binary.
    let _ = result;
}
