//! Graph construction — scan, parallel per-file parse, deterministic merge.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use codescout_core::config::ScanConfig;
use codescout_core::errors::{ParseError, ScanError};
use codescout_core::traits::TokenEstimator;
use codescout_core::types::collections::FxHashSet;
use rayon::prelude::*;

use super::resolve::resolve_import;
use super::types::{FileNode, GraphResult, GraphStats, ImportGraph};
use crate::parsers::ParserRegistry;
use crate::scanner::{Language, ScanCancellation, Scanner, SourceFile};

/// Convert a root-relative path to its graph key (`/`-separated).
pub fn path_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds the import graph for a directory tree.
///
/// Per-file work (read, parse, token count) runs in parallel; the merge into
/// the node map is single-threaded over path-sorted records, so the final
/// graph is identical regardless of completion order.
pub struct GraphBuilder {
    config: ScanConfig,
    registry: ParserRegistry,
    estimator: Arc<dyn TokenEstimator>,
}

/// Per-file intermediate produced by the parallel phase.
struct FileRecord {
    key: String,
    language: Language,
    content: String,
    token_count: usize,
    imports: Vec<String>,
    warning: Option<String>,
    parse_failed: bool,
}

impl GraphBuilder {
    pub fn new(config: ScanConfig, estimator: Arc<dyn TokenEstimator>) -> Self {
        Self {
            config,
            registry: ParserRegistry::new(),
            estimator,
        }
    }

    /// Build the graph for `root`.
    pub fn build(&self, root: &Path) -> Result<GraphResult, ScanError> {
        self.build_with_cancellation(root, None)
    }

    /// Build the graph for `root`, checking `cancel` between phases.
    pub fn build_with_cancellation(
        &self,
        root: &Path,
        cancel: Option<&ScanCancellation>,
    ) -> Result<GraphResult, ScanError> {
        let start = Instant::now();

        if self.config.threads() > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads())
                .build_global()
                .ok();
        }

        let scanner = Scanner::new(root, &self.config)?;
        let scan = scanner.scan(cancel)?;

        let known: FxHashSet<String> = scan.files.iter().map(|f| path_key(&f.path)).collect();

        if cancel.is_some_and(|c| c.is_cancelled()) {
            return Err(ScanError::Cancelled);
        }

        let mut records: Vec<FileRecord> = scan
            .files
            .par_iter()
            .map(|file| self.process_file(root, file, &known))
            .collect();

        // Path order, not completion order, decides the merge.
        records.sort_by(|a, b| a.key.cmp(&b.key));

        let mut graph = ImportGraph::new();
        let mut warnings = scan.errors.clone();
        let mut edges: Vec<(String, String)> = Vec::new();
        let mut parse_failures = 0usize;

        for record in records {
            if let Some(warning) = record.warning {
                warnings.push(warning);
            }
            if record.parse_failed {
                parse_failures += 1;
            }
            for imported in &record.imports {
                edges.push((record.key.clone(), imported.clone()));
            }
            graph.insert(FileNode {
                path: record.key,
                language: Some(record.language),
                content: record.content,
                token_count: record.token_count,
                imports: Default::default(),
                imported_by: Default::default(),
            });
        }

        for (importer, imported) in &edges {
            graph.add_edge(importer, imported);
        }

        let stats = GraphStats {
            files: graph.len(),
            edges: graph.edge_count(),
            parse_failures,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::debug!(
            files = stats.files,
            edges = stats.edges,
            parse_failures = stats.parse_failures,
            "import graph built"
        );

        Ok(GraphResult {
            graph,
            warnings,
            stats,
        })
    }

    /// Read, parse, and cost one file. Never fails: problems degrade to an
    /// isolated node plus a warning.
    fn process_file(&self, root: &Path, file: &SourceFile, known: &FxHashSet<String>) -> FileRecord {
        let key = path_key(&file.path);
        let language = file.language;
        let isolated = |key: String, content: String, token_count: usize, warning: String| {
            FileRecord {
                key,
                language,
                content,
                token_count,
                imports: Vec::new(),
                warning: Some(warning),
                parse_failed: true,
            }
        };

        let bytes = match std::fs::read(root.join(&file.path)) {
            Ok(bytes) => bytes,
            Err(e) => {
                let warning = format!("failed to read {key}: {e}");
                return FileRecord {
                    key,
                    language,
                    content: String::new(),
                    token_count: 0,
                    imports: Vec::new(),
                    warning: Some(warning),
                    parse_failed: false,
                };
            }
        };

        let (content, valid_utf8) = match String::from_utf8(bytes) {
            Ok(text) => (text, true),
            Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
        };
        let token_count = self.estimator.estimate(&content);

        if !valid_utf8 {
            let warning = ParseError::InvalidEncoding {
                path: file.path.clone(),
            }
            .to_string();
            return isolated(key, content, token_count, warning);
        }

        match self.registry.parse(language, &content, &file.path) {
            Ok(parsed) if !parsed.has_errors => {
                let mut imports: Vec<String> = parsed
                    .imports
                    .iter()
                    .filter_map(|raw| resolve_import(raw, &key, language, known))
                    .collect();
                imports.sort_unstable();
                imports.dedup();
                FileRecord {
                    key,
                    language,
                    content,
                    token_count,
                    imports,
                    warning: None,
                    parse_failed: false,
                }
            }
            Ok(_) => {
                let warning = format!("syntax errors in {key}");
                isolated(key, content, token_count, warning)
            }
            Err(e) => {
                let warning = format!("failed to parse {key}: {e}");
                isolated(key, content, token_count, warning)
            }
        }
    }
}
