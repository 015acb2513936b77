//! Structured Logger
//!
//! Wraps `tracing` with an env-controlled level filter, a console layer on
//! stderr, and an optional daily-rotated JSON file layer.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for rolled logs: `mdplain.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "mdplain.log";

/// Level filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global structured logger.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logger(level: &str, log_dir: Option<&Path>) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_level_falls_back() {
        // Must not panic on garbage.
        let _ = build_filter("not a [valid filter");
    }

    #[test]
    fn test_init_twice_with_file() {
        let dir = tempfile::tempdir().unwrap();
        init_logger("debug", Some(dir.path()));
        init_logger("info", None);
        tracing::info!("logged after init");
    }
}
