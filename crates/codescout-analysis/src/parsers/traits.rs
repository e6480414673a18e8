//! LanguageParser trait — the contract every language parser implements.

use std::path::Path;

use codescout_core::errors::ParseError;

use super::types::ModuleImports;
use crate::scanner::language_detect::Language;

/// Trait that every language parser must implement.
pub trait LanguageParser: Send + Sync {
    /// The language this parser handles.
    fn language(&self) -> Language;

    /// File extensions this parser handles.
    fn extensions(&self) -> &[&str];

    /// Extract the file's import statements, top-level and nested.
    fn parse(&self, source: &str, path: &Path) -> Result<ModuleImports, ParseError>;
}
