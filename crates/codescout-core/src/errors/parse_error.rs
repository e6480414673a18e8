//! Parser errors.

use std::path::PathBuf;

/// Errors that can occur while extracting imports from a file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar not available for {language}: {message}")]
    GrammarUnavailable { language: String, message: String },

    #[error("Failed to parse {path}")]
    Syntax { path: PathBuf },

    #[error("Invalid encoding in {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("Unsupported language: {extension}")]
    UnsupportedLanguage { extension: String },
}
