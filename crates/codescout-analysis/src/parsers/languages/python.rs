//! Python import extraction.

use std::path::Path;
use std::time::Instant;

use codescout_core::errors::ParseError;
use codescout_core::types::collections::SmallVec4;
use tree_sitter::Node;

use super::{node_line, node_text, parse_tree};
use crate::parsers::traits::LanguageParser;
use crate::parsers::types::{ImportKind, ModuleImports, RawImport};
use crate::scanner::language_detect::Language;

pub struct PythonParser;

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn parse(&self, source: &str, path: &Path) -> Result<ModuleImports, ParseError> {
        let start = Instant::now();
        let bytes = source.as_bytes();
        let tree = parse_tree(bytes, path, Language::Python, Language::Python.ts_language())?;

        let mut imports = Vec::new();
        collect_python_imports(tree.root_node(), bytes, &mut imports);

        Ok(ModuleImports {
            file: path.to_path_buf(),
            language: Language::Python,
            imports,
            has_errors: tree.root_node().has_error(),
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}

/// Walk the tree collecting `import` and `from ... import` statements,
/// including those nested inside functions and conditionals.
fn collect_python_imports(node: Node, source: &[u8], out: &mut Vec<RawImport>) {
    match node.kind() {
        "import_statement" => {
            // `import a.b, c as d`
            for i in 0..node.named_child_count() {
                let Some(child) = node.named_child(i) else {
                    continue;
                };
                let module = match child.kind() {
                    "dotted_name" => node_text(&child, source).to_string(),
                    "aliased_import" => child
                        .child_by_field_name("name")
                        .map(|n| node_text(&n, source).to_string())
                        .unwrap_or_default(),
                    _ => continue,
                };
                if !module.is_empty() {
                    out.push(RawImport {
                        module,
                        names: SmallVec4::new(),
                        kind: ImportKind::Module,
                        line: node_line(&node),
                    });
                }
            }
            return;
        }
        "import_from_statement" => {
            let mut dots = 0u32;
            let mut module = String::new();

            if let Some(module_node) = node.child_by_field_name("module_name") {
                match module_node.kind() {
                    "dotted_name" => module = node_text(&module_node, source).to_string(),
                    "relative_import" => {
                        for i in 0..module_node.named_child_count() {
                            let Some(part) = module_node.named_child(i) else {
                                continue;
                            };
                            match part.kind() {
                                "import_prefix" => {
                                    dots = node_text(&part, source).matches('.').count() as u32
                                }
                                "dotted_name" => {
                                    module = node_text(&part, source).to_string()
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }

            let mut names = SmallVec4::new();
            let mut cursor = node.walk();
            for name_node in node.children_by_field_name("name", &mut cursor) {
                match name_node.kind() {
                    "dotted_name" => names.push(node_text(&name_node, source).to_string()),
                    "aliased_import" => {
                        if let Some(original) = name_node.child_by_field_name("name") {
                            names.push(node_text(&original, source).to_string());
                        }
                    }
                    _ => {}
                }
            }

            if !module.is_empty() || dots > 0 {
                let kind = if dots > 0 {
                    ImportKind::RelativeModule { dots }
                } else {
                    ImportKind::Module
                };
                out.push(RawImport {
                    module,
                    names,
                    kind,
                    line: node_line(&node),
                });
            }
            return;
        }
        _ => {}
    }

    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            collect_python_imports(child, source, out);
        }
    }
}
