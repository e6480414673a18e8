//! Canonical import-extraction output types.
//!
//! Parsers report imports as written; resolution to file paths happens in the
//! graph builder, against the set of scanned files.

use std::path::PathBuf;

use codescout_core::types::collections::SmallVec4;
use serde::{Deserialize, Serialize};

use crate::scanner::language_detect::Language;

/// How an import statement references its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    /// Package-absolute module reference (`import a.b`, `import "react"`).
    Module,
    /// Dotted-relative module reference (`from ..pkg import x`).
    /// `dots` counts the leading dots; one dot means the importer's directory.
    RelativeModule { dots: u32 },
    /// Filesystem-relative specifier (`import "./util"`).
    Path,
}

/// One import statement as written in the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImport {
    /// Module path or specifier as written, leading dots stripped.
    pub module: String,
    /// Imported symbol names, when the statement lists them.
    pub names: SmallVec4<String>,
    pub kind: ImportKind,
    /// 1-based source line of the statement.
    pub line: u32,
}

/// All imports extracted from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleImports {
    pub file: PathBuf,
    pub language: Language,
    pub imports: Vec<RawImport>,
    /// True when the syntax tree contains error nodes.
    pub has_errors: bool,
    pub parse_time_us: u64,
}
