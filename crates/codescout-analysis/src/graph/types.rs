//! Import graph types — a flat, path-keyed node map.
//!
//! Nodes reference each other by key, not by pointer, so cycles are ordinary
//! data: `A imports B` and `B imports A` are just two set entries.

use std::collections::BTreeSet;

use codescout_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::scanner::language_detect::Language;

/// One source file in the import graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Root-relative path with `/` separators; the node's identity.
    pub path: String,
    /// Detected language; `None` for files admitted outside the language set.
    pub language: Option<Language>,
    pub content: String,
    pub token_count: usize,
    /// Paths this file imports that resolved to another scanned file.
    pub imports: BTreeSet<String>,
    /// Paths that import this file. Mirror of `imports`: for any nodes A and B,
    /// `B.path ∈ A.imports` iff `A.path ∈ B.imported_by`.
    pub imported_by: BTreeSet<String>,
}

impl FileNode {
    /// Create a node with no edges and no token cost.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language: None,
            content: content.into(),
            token_count: 0,
            imports: BTreeSet::new(),
            imported_by: BTreeSet::new(),
        }
    }
}

/// Directed import graph keyed by root-relative path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportGraph {
    nodes: FxHashMap<String, FileNode>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: FileNode) {
        self.nodes.insert(node.path.clone(), node);
    }

    pub fn get(&self, path: &str) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record `importer → imported`, keeping both adjacency sets in sync.
    /// Returns false when either endpoint is missing from the graph.
    pub fn add_edge(&mut self, importer: &str, imported: &str) -> bool {
        if !self.nodes.contains_key(importer) || !self.nodes.contains_key(imported) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(importer) {
            node.imports.insert(imported.to_string());
        }
        if let Some(node) = self.nodes.get_mut(imported) {
            node.imported_by.insert(importer.to_string());
        }
        true
    }

    /// Total number of import edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.imports.len()).sum()
    }

    /// All node paths in lexical order, for deterministic iteration.
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values()
    }
}

/// Aggregate statistics for a graph build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub files: usize,
    pub edges: usize,
    pub parse_failures: usize,
    pub duration_ms: u64,
}

/// A built graph plus non-fatal warnings collected along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphResult {
    pub graph: ImportGraph,
    pub warnings: Vec<String>,
    pub stats: GraphStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_keeps_sets_in_sync() {
        let mut graph = ImportGraph::new();
        graph.insert(FileNode::new("a.py", ""));
        graph.insert(FileNode::new("b.py", ""));

        assert!(graph.add_edge("a.py", "b.py"));
        assert!(graph.get("a.py").unwrap().imports.contains("b.py"));
        assert!(graph.get("b.py").unwrap().imported_by.contains("a.py"));
    }

    #[test]
    fn add_edge_rejects_missing_endpoints() {
        let mut graph = ImportGraph::new();
        graph.insert(FileNode::new("a.py", ""));
        assert!(!graph.add_edge("a.py", "ghost.py"));
        assert!(graph.get("a.py").unwrap().imports.is_empty());
    }

    #[test]
    fn self_edge_is_representable() {
        let mut graph = ImportGraph::new();
        graph.insert(FileNode::new("loop.py", ""));
        assert!(graph.add_edge("loop.py", "loop.py"));
        let node = graph.get("loop.py").unwrap();
        assert!(node.imports.contains("loop.py"));
        assert!(node.imported_by.contains("loop.py"));
    }

    #[test]
    fn edges_are_idempotent() {
        let mut graph = ImportGraph::new();
        graph.insert(FileNode::new("a.py", ""));
        graph.insert(FileNode::new("b.py", ""));
        graph.add_edge("a.py", "b.py");
        graph.add_edge("a.py", "b.py");
        assert_eq!(graph.edge_count(), 1);
    }
}
