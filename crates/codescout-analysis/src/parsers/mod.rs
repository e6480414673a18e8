//! Parser subsystem — per-language import extraction via tree-sitter.

pub mod languages;
pub mod traits;
pub mod types;

use std::path::Path;

use codescout_core::errors::ParseError;

use crate::scanner::language_detect::Language;
use languages::{JavaScriptParser, PythonParser, TypeScriptParser};

pub use traits::LanguageParser;
pub use types::{ImportKind, ModuleImports, RawImport};

/// Dispatches files to the parser for their language.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn LanguageParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(PythonParser::new()),
                Box::new(TypeScriptParser::new()),
                Box::new(JavaScriptParser::new()),
            ],
        }
    }

    /// The parser registered for `language`, if any.
    pub fn for_language(&self, language: Language) -> Option<&dyn LanguageParser> {
        self.parsers
            .iter()
            .find(|p| p.language() == language)
            .map(|p| p.as_ref())
    }

    /// Extract imports from `source` using the parser for `language`.
    pub fn parse(
        &self,
        language: Language,
        source: &str,
        path: &Path,
    ) -> Result<ModuleImports, ParseError> {
        let parser =
            self.for_language(language)
                .ok_or_else(|| ParseError::UnsupportedLanguage {
                    extension: language.name().to_lowercase(),
                })?;
        parser.parse(source, path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
