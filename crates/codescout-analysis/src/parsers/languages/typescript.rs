//! TypeScript parser.

use std::path::Path;
use std::time::Instant;

use codescout_core::errors::ParseError;

use super::{collect_ecma_imports, parse_tree};
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::ModuleImports;
use crate::scanner::language_detect::Language;

pub struct TypeScriptParser;

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for TypeScriptParser {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extensions(&self) -> &[&str] {
        &["ts", "tsx", "mts", "cts"]
    }

    fn parse(&self, source: &str, path: &Path) -> Result<ModuleImports, ParseError> {
        let start = Instant::now();
        let bytes = source.as_bytes();
        let ext = path.extension().and_then(|e| e.to_str());
        let grammar = Language::TypeScript.ts_language_for_ext(ext);
        let tree = parse_tree(bytes, path, Language::TypeScript, grammar)?;

        let mut imports = Vec::new();
        collect_ecma_imports(tree.root_node(), bytes, &mut imports);

        Ok(ModuleImports {
            file: path.to_path_buf(),
            language: Language::TypeScript,
            imports,
            has_errors: tree.root_node().has_error(),
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::types::ImportKind;

    fn parse(source: &str) -> ModuleImports {
        TypeScriptParser::new()
            .parse(source, Path::new("test.ts"))
            .unwrap()
    }

    #[test]
    fn extracts_relative_and_bare_imports() {
        let result = parse("import { helper } from './util';\nimport React from 'react';\n");
        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].module, "./util");
        assert_eq!(result.imports[0].kind, ImportKind::Path);
        assert_eq!(result.imports[0].names.as_slice(), ["helper"]);
        assert_eq!(result.imports[1].module, "react");
        assert_eq!(result.imports[1].kind, ImportKind::Module);
    }

    #[test]
    fn extracts_reexports() {
        let result = parse("export { thing } from './things';\n");
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "./things");
    }

    #[test]
    fn type_only_imports_count() {
        let result = parse("import type { Config } from './config';\n");
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "./config");
    }
}
