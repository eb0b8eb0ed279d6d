//! Tracing setup for the interactive driver.
//!
//! stdout belongs to the REPL, so everything goes to a size-rotated
//! `statusbar.log` in the user config directory. Warnings are echoed on
//! stderr. `DEBUG_LOGGING` raises the statusbar crates to debug.

use std::path::{Path, PathBuf};

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

const LOG_FILE: &str = "statusbar.log";
const LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
const DEBUG_CRATES: [&str; 3] = ["statusbar_cli", "statusbar_core", "statusbar_overlay"];

fn file_filter(debug_logging: bool) -> EnvFilter {
    let mut directive = String::from("info");
    if debug_logging {
        for krate in DEBUG_CRATES {
            directive.push_str(&format!(",{krate}=debug"));
        }
    }
    EnvFilter::new(directive)
}

fn log_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("statusbar");
    std::fs::create_dir_all(&dir)
        .inspect_err(|e| eprintln!("log directory {} unavailable: {e}", dir.display()))
        .ok()?;
    Some(dir.join(LOG_FILE))
}

fn open_log(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    let appender = BasicRollingFileAppender::new(
        path,
        RollingConditionBasic::new().max_size(LOG_MAX_BYTES),
        1,
    )
    .inspect_err(|e| eprintln!("log file {} unavailable: {e}", path.display()))
    .ok()?;
    Some(tracing_appender::non_blocking(appender))
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered lines reach the file.
/// Without a writable log file, only stderr output is installed.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();
    let path = log_path();
    let (writer, guard) = path.as_deref().and_then(open_log).unzip();

    let file_layer = writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(file_filter(debug_logging))
    });
    let stderr_level = if file_layer.is_some() {
        LevelFilter::WARN
    } else if debug_logging {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_level);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    match &path {
        Some(path) if guard.is_some() => {
            tracing::info!(log_file = %path.display(), debug_logging, "Logging started")
        }
        _ => tracing::warn!("Logging to stderr only"),
    }
    guard
}
