//! Logging initialization
//!
//! Respects the RUST_LOG environment variable, falls back to an explicit
//! filter when given, and defaults to "info" otherwise.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for the CLI
///
/// RUST_LOG always takes precedence over the configured filter.
pub fn init_logging(filter: Option<&str>) {
    let mut env_filter = EnvFilter::from_default_env();

    if std::env::var("RUST_LOG").is_err() {
        env_filter = match filter {
            Some(f) => EnvFilter::new(f),
            None => EnvFilter::new("info"),
        };
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .with(env_filter)
        .init();
}
