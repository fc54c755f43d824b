//! Error types and exit codes for vizbuzz

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for vizbuzz operations
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Watch directory not found: {}", path.display())]
    WatchDirNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid listen address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    /// Convert error to the process exit code:
    /// - 1: Watch directory missing / IO error
    /// - 2: Bad configuration
    /// - 3: Decode or serialization failure
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Raw status byte behind [`VizError::exit_code`]
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::WatchDirNotFound { .. } => 1,
            Self::NotADirectory { .. } => 2,
            Self::InvalidAddress { .. } => 2,
            Self::Decode { .. } => 3,
            Self::Json(_) => 3,
            Self::Io(_) => 1,
        }
    }
}

/// Result type alias for vizbuzz operations
pub type Result<T> = std::result::Result<T, VizError>;
