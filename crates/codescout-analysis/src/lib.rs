//! # codescout-analysis
//!
//! Import-graph construction for the codescout context engine:
//! - Scanner: file discovery with ignore patterns and size limits
//! - Parsers: tree-sitter import extraction per language
//! - Graph: directed importer/imported graph over a source tree

pub mod graph;
pub mod parsers;
pub mod scanner;

pub use graph::{path_key, FileNode, GraphBuilder, GraphResult, GraphStats, ImportGraph};
pub use parsers::{ModuleImports, ParserRegistry, RawImport};
pub use scanner::{Language, ScanCancellation, ScanResult, Scanner, SourceFile};
