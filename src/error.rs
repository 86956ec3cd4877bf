//! Error types for the gait-events pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Gait core error: {0}")]
    Core(#[from] gait_core::Error),

    /// The recording could not be opened; nothing was processed
    #[error("Recording not found or unreadable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recording at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Name of the offending parameter, if this is a configuration error
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Core(core) => core.parameter(),
            _ => None,
        }
    }
}
