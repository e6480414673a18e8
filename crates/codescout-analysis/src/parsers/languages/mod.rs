//! Language parser implementations and shared tree-sitter plumbing.

pub mod javascript;
pub mod python;
pub mod typescript;

use std::path::Path;

use codescout_core::errors::ParseError;
use codescout_core::types::collections::SmallVec4;
use tree_sitter::Node;

use super::types::{ImportKind, RawImport};
use crate::scanner::language_detect::Language;

pub use javascript::JavaScriptParser;
pub use python::PythonParser;
pub use typescript::TypeScriptParser;

/// Parse `source` with the given grammar, producing a syntax tree.
pub(crate) fn parse_tree(
    source: &[u8],
    path: &Path,
    language: Language,
    ts_language: tree_sitter::Language,
) -> Result<tree_sitter::Tree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&ts_language)
        .map_err(|e| ParseError::GrammarUnavailable {
            language: language.name().to_string(),
            message: e.to_string(),
        })?;
    parser.parse(source, None).ok_or_else(|| ParseError::Syntax {
        path: path.to_path_buf(),
    })
}

/// Text of a node, empty on encoding trouble.
pub(crate) fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Strip matching string quotes from a specifier literal.
pub(crate) fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

/// 1-based line of a node.
pub(crate) fn node_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Walk an ECMAScript (JS/TS) tree collecting import edges.
///
/// Handles `import ... from "x"`, `export ... from "x"`, and literal
/// `require("x")` calls. Computed and dynamic specifiers are left alone.
pub(crate) fn collect_ecma_imports(node: Node, source: &[u8], out: &mut Vec<RawImport>) {
    match node.kind() {
        "import_statement" => {
            if let Some(source_node) = node.child_by_field_name("source") {
                let specifier = unquote(node_text(&source_node, source)).to_string();
                if !specifier.is_empty() {
                    let mut names = SmallVec4::new();
                    collect_import_specifiers(node, source, &mut names);
                    out.push(RawImport {
                        kind: ecma_kind(&specifier),
                        module: specifier,
                        names,
                        line: node_line(&node),
                    });
                }
            }
            return;
        }
        "export_statement" => {
            // Re-exports create the same dependency an import does.
            if let Some(source_node) = node.child_by_field_name("source") {
                let specifier = unquote(node_text(&source_node, source)).to_string();
                if !specifier.is_empty() {
                    out.push(RawImport {
                        kind: ecma_kind(&specifier),
                        module: specifier,
                        names: SmallVec4::new(),
                        line: node_line(&node),
                    });
                }
            }
        }
        "call_expression" => {
            if let Some(require) = extract_require(node, source) {
                out.push(require);
            }
        }
        _ => {}
    }

    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            collect_ecma_imports(child, source, out);
        }
    }
}

/// Collect named specifiers (`import { a, b as c } from ...`) under an import.
fn collect_import_specifiers(node: Node, source: &[u8], out: &mut SmallVec4<String>) {
    if node.kind() == "import_specifier" {
        if let Some(name) = node.child_by_field_name("name") {
            out.push(node_text(&name, source).to_string());
        }
        return;
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            collect_import_specifiers(child, source, out);
        }
    }
}

/// A literal `require("x")` call, if this call expression is one.
fn extract_require(node: Node, source: &[u8]) -> Option<RawImport> {
    let func = node.child_by_field_name("function")?;
    if func.kind() != "identifier" || node_text(&func, source) != "require" {
        return None;
    }
    let args = node.child_by_field_name("arguments")?;
    let arg = args.named_child(0)?;
    if arg.kind() != "string" {
        return None;
    }
    let specifier = unquote(node_text(&arg, source)).to_string();
    if specifier.is_empty() {
        return None;
    }
    Some(RawImport {
        kind: ecma_kind(&specifier),
        module: specifier,
        names: SmallVec4::new(),
        line: node_line(&node),
    })
}

/// Classify an ECMAScript specifier: filesystem-relative vs package reference.
fn ecma_kind(specifier: &str) -> ImportKind {
    if specifier.starts_with('.') {
        ImportKind::Path
    } else {
        ImportKind::Module
    }
}
