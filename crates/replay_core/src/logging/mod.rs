//! Logging infrastructure for Gaze Replay.
//!
//! Console logging goes through `tracing` with an `EnvFilter`, so
//! `RUST_LOG` always wins. The player binary additionally mirrors
//! everything at debug level into a log file in the user settings
//! directory, matching the recording tools' player log.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file name inside the settings directory.
pub const LOG_FILE: &str = "player.log";

/// Initialize a console-only subscriber.
///
/// Respects `RUST_LOG`, falling back to the provided default directive.
/// Should be called once at application startup.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Initialize tracing in tests; repeated calls are a no-op.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Initialize console + file logging.
///
/// The console layer follows `RUST_LOG` (default: the provided
/// directive); the file layer always logs at debug level into
/// `<log_dir>/player.log`, truncated per run. The returned guard must be
/// held for the process lifetime or buffered lines are lost.
pub fn init_with_file(log_dir: &Path, default_directive: &str) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file = std::fs::File::create(log_dir.join(LOG_FILE))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(io::stderr)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug")),
        )
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_logging_creates_the_log_file() {
        init_test_tracing();
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");

        // A subscriber is already installed, so init fails; the log file
        // must exist regardless.
        let guard = init_with_file(&logs, "warn");
        drop(guard);

        assert!(logs.join(LOG_FILE).exists());
    }
}
