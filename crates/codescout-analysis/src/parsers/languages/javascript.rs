//! JavaScript parser.

use std::path::Path;
use std::time::Instant;

use codescout_core::errors::ParseError;

use super::{collect_ecma_imports, parse_tree};
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ModuleImports;
use crate::scanner::language_detect::Language;

pub struct JavaScriptParser;

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for JavaScriptParser {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn extensions(&self) -> &[&str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, source: &str, path: &Path) -> Result<ModuleImports, ParseError> {
        let start = Instant::now();
        let bytes = source.as_bytes();
        let tree = parse_tree(
            bytes,
            path,
            Language::JavaScript,
            Language::JavaScript.ts_language(),
        )?;

        let mut imports = Vec::new();
        collect_ecma_imports(tree.root_node(), bytes, &mut imports);

        Ok(ModuleImports {
            file: path.to_path_buf(),
            language: Language::JavaScript,
            imports,
            has_errors: tree.root_node().has_error(),
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}
