//! Logging utilities for the Christmas Cheer service.
//!
//! Every crate logs through the `tracing` macros; this module installs the subscriber
//! once at startup. `RUST_LOG` wins over the configured level when it is set.

use cheer_config::LoggingConfig;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix used by the rolling file appender.
const LOG_FILE_PREFIX: &str = "cheer.log";

/// Initialize the tracing subscriber from the logging section of the app config.
///
/// When `directory` is set a daily rolling file is written there in addition to stdout.
/// The returned guard flushes the file writer on drop and must be held by `main`.
///
/// Uses `try_init`, so calling this a second time (e.g. from tests) is a no-op.
pub fn init_with_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,cheer={}", config.level)));

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", config.level);
    }
    guard
}
