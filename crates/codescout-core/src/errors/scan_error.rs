//! Scanner errors.

use std::path::PathBuf;

/// Errors that can occur during file scanning.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan root not found or not a directory: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Scan cancelled")]
    Cancelled,
}
