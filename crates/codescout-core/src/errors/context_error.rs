//! Context-request errors.
//!
//! Fatal failures for a single context request. Per-file problems during the
//! scan are collected as warnings on the result instead of surfacing here.

use std::path::PathBuf;

use super::{ConfigError, ScanError};

/// Errors that abort a context request.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Target file not found: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Target is outside the scanned root: {path}")]
    OutsideRoot { path: PathBuf },

    #[error("Failed to read target {path}: {source}")]
    TargetUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
