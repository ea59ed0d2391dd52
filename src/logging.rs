//! Structured logging with `tracing`.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "MOLTSOLVE_LOG";

/// Install the global subscriber. Output goes to stderr so stdout stays
/// machine-readable.
///
/// `default_level` applies when neither `MOLTSOLVE_LOG` nor `RUST_LOG` holds a
/// valid filter.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).compact().init();
}
