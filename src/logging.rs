//! Logging setup
//!
//! The console owns the terminal, so nothing may be written to stdout or
//! stderr while it runs. Everything goes to `sentinel.log` next to the
//! executable, truncated on each start. `SENTINEL_LOG` overrides the
//! configured filter (e.g. `SENTINEL_LOG=palette=debug,search=trace`).

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "SENTINEL_LOG";

static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Get the log file path (same directory as executable)
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sentinel.log")
}

fn open_log(path: &PathBuf) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .ok()
}

/// Install the global subscriber. Safe to call more than once; only the
/// first call has an effect. Returns the log file in use, if any.
pub fn init(default_level: &str) -> Option<PathBuf> {
    LOG_PATH
        .get_or_init(|| {
            let path = log_path();
            let file = open_log(&path)?;

            let filter = EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new("info"));

            let installed = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .try_init()
                .is_ok();

            installed.then_some(path)
        })
        .clone()
}

/// Write a separator line for readability
pub fn separator(label: &str) {
    tracing::info!(target: "main", "========== {} ==========", label);
}
