//! This module sets up logging to `stdout` and to daily log files.

use std::path::Path;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The common prefix for the log files.
const LOG_PREFIX: &str = "particle-photo-tree.log";

/// Initialise a subscriber for tracing to log to `stdout` and to a file in the given directory.
///
/// The file gets everything at the debug level and above. `stdout` gets info and above, unless
/// overridden with `RUST_LOG`. The returned guard must be kept alive for the file logging to
/// keep working.
pub fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let (appender, guard) = non_blocking(rolling::daily(log_dir, LOG_PREFIX));

    let subscriber = tracing_subscriber::registry()
        .with(
            Layer::new()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .parse_lossy(""),
                ),
        )
        .with(
            Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env_lossy(),
                ),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");

    guard
}
