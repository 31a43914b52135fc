//! Error types for Sentinel
//!
//! The search core itself cannot fail; these cover the I/O around it
//! (config and dataset files, the terminal, CLI arguments).

use thiserror::Error;

/// Main error type for Sentinel operations
#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown route '{0}'")]
    UnknownRoute(String),

    #[error("Unknown category '{0}' (expected users, devices, user-groups or card-templates)")]
    UnknownCategory(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for Sentinel operations
pub type Result<T> = std::result::Result<T, SentinelError>;

impl SentinelError {
    /// Attach a file path to an I/O failure while loading a file
    pub fn file(path: &std::path::Path, err: std::io::Error) -> Self {
        SentinelError::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.display(), err),
        ))
    }

    /// Whether the console can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SentinelError::UnknownRoute(_) | SentinelError::UnknownCategory(_)
        )
    }
}
