//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate
//! under `--verbose`. Output goes to stderr so stdout stays pipeable.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let default = if verbose { "ckit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Verbose logging for tests, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
