//! Tracing setup for the inlay binaries.
//!
//! One process-global subscriber, installed once by the entry point.
//! `RUST_LOG`, when set, overrides the configured level filter, so a
//! directive like `inlay_render_engine=debug` needs no config edit.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// Repeated calls are no-ops; the first installed subscriber wins.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder().with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
