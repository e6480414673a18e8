//! Scanner data types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::language_detect::Language;

/// A discovered source file, path relative to the scan root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
    pub language: Language,
}

/// Aggregate statistics for a scan operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub by_language: HashMap<String, usize>,
    pub total_bytes: u64,
    /// Files skipped because of size or unrecognized extension.
    pub files_skipped: usize,
    pub duration_ms: u64,
}

/// Result of a scan operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    /// Non-fatal errors encountered while walking.
    pub errors: Vec<String>,
    pub stats: ScanStats,
}
