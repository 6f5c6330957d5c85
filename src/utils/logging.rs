//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "error";

/// Setup logging for a run; diagnostics go to stderr
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .init();
}
