//! The context engine — orchestrates one request end to end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use codescout_analysis::graph::{path_key, FileNode, GraphBuilder, ImportGraph};
use codescout_core::config::CodescoutConfig;
use codescout_core::errors::{ConfigError, ContextError};
use serde::{Deserialize, Serialize};

use crate::allocation::{BudgetAllocator, EntryRole, ReadmeFile};
use crate::formats;
use crate::locator::find_readme;
use crate::tokenization::TokenCounter;

/// One context request from the surrounding tool layer.
#[derive(Debug, Clone)]
pub struct ContextRequest {
    /// File to assemble context for. Must exist under `root`.
    pub target_path: PathBuf,
    /// Directory to scan for the import graph.
    pub root: PathBuf,
    /// Budget override; falls back to the configured default.
    pub token_budget: Option<usize>,
    /// README toggle override; falls back to the configured default.
    pub include_readme: Option<bool>,
}

impl ContextRequest {
    pub fn new(target_path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            root: root.into(),
            token_budget: None,
            include_readme: None,
        }
    }
}

/// The rendered bundle plus metadata the caller may surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextOutput {
    /// The formatted bundle text.
    pub text: String,
    pub used_tokens: usize,
    pub budget: usize,
    /// True when the mandatory baseline alone exceeded the budget.
    pub over_budget: bool,
    /// Total files in the bundle, baseline included.
    pub file_count: usize,
    pub imports_included: usize,
    pub importers_included: usize,
    pub siblings_included: usize,
    /// Non-fatal problems encountered during the scan.
    pub warnings: Vec<String>,
}

/// Assembles context bundles. Holds the process-lifetime token cache; the
/// import graph itself is rebuilt fresh on every request.
pub struct ContextEngine {
    config: CodescoutConfig,
    counter: Arc<TokenCounter>,
}

impl ContextEngine {
    pub fn new(config: CodescoutConfig) -> Self {
        Self::with_counter(config, Arc::new(TokenCounter::default()))
    }

    /// Inject a counter, letting tests start from a fresh cache.
    pub fn with_counter(config: CodescoutConfig, counter: Arc<TokenCounter>) -> Self {
        Self { config, counter }
    }

    /// Assemble and render the context bundle for one request.
    pub fn generate(&self, request: &ContextRequest) -> Result<ContextOutput, ContextError> {
        let budget = request
            .token_budget
            .unwrap_or_else(|| self.config.context.token_budget());
        if budget == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "token_budget".to_string(),
                message: "must be greater than 0".to_string(),
            }
            .into());
        }

        let (root, target) = self.validate_paths(request)?;
        let target_key = path_key(
            target
                .strip_prefix(&root)
                .map_err(|_| ContextError::OutsideRoot {
                    path: request.target_path.clone(),
                })?,
        );

        tracing::debug!(file = %target_key, budget, "assembling context");

        let builder = GraphBuilder::new(self.config.scan.clone(), self.counter.clone());
        let mut result = builder.build(&root)?;

        // A target outside the scanned language set still gets a bundle:
        // admit it as an isolated node.
        if !result.graph.contains(&target_key) {
            self.admit_isolated_target(&mut result.graph, &target, &target_key)?;
            result
                .warnings
                .push(format!("{target_key}: not part of the scanned sources"));
        }

        let include_readme = request
            .include_readme
            .unwrap_or_else(|| self.config.context.include_readme());
        let readme = if include_readme {
            self.load_readme(&root, &target, &target_key, &mut result.warnings)
        } else {
            None
        };

        let allocator = BudgetAllocator::from_config(&self.config.context);
        let bundle = allocator.allocate(&target_key, &result.graph, budget, readme)?;

        let text = formats::render(self.config.context.format(), &bundle);

        Ok(ContextOutput {
            text,
            used_tokens: bundle.used_tokens,
            budget: bundle.budget,
            over_budget: bundle.over_budget(),
            file_count: bundle.entries.len(),
            imports_included: bundle.count_role(EntryRole::Import),
            importers_included: bundle.count_role(EntryRole::Importer),
            siblings_included: bundle.count_role(EntryRole::Sibling),
            warnings: result.warnings,
        })
    }

    /// Canonicalize the request paths and confirm the target sits under the
    /// root. Missing or unreadable targets are fatal.
    fn validate_paths(&self, request: &ContextRequest) -> Result<(PathBuf, PathBuf), ContextError> {
        let target =
            request
                .target_path
                .canonicalize()
                .map_err(|_| ContextError::TargetNotFound {
                    path: request.target_path.clone(),
                })?;
        if !target.is_file() {
            return Err(ContextError::TargetNotFound {
                path: request.target_path.clone(),
            });
        }
        let root = request
            .root
            .canonicalize()
            .map_err(|_| ContextError::Scan(codescout_core::errors::ScanError::RootNotFound {
                path: request.root.clone(),
            }))?;
        Ok((root, target))
    }

    /// Read a directly-requested file the scanner skipped and insert it as a
    /// node with no edges.
    fn admit_isolated_target(
        &self,
        graph: &mut ImportGraph,
        target: &Path,
        target_key: &str,
    ) -> Result<(), ContextError> {
        let content =
            std::fs::read_to_string(target).map_err(|e| ContextError::TargetUnreadable {
                path: target.to_path_buf(),
                source: e,
            })?;
        let mut node = FileNode::new(target_key, content);
        node.token_count = self.counter.count_cached(&node.content);
        graph.insert(node);
        Ok(())
    }

    /// Locate and price the README next to the target, if any.
    fn load_readme(
        &self,
        root: &Path,
        target: &Path,
        target_key: &str,
        warnings: &mut Vec<String>,
    ) -> Option<ReadmeFile> {
        let readme_path = find_readme(target)?;
        let key = readme_path
            .strip_prefix(root)
            .map(path_key)
            .unwrap_or_else(|_| readme_path.display().to_string());

        // The target being its own README would double-include it.
        if key == target_key {
            return None;
        }

        match std::fs::read_to_string(&readme_path) {
            Ok(content) => {
                let token_count = self.counter.count_cached(&content);
                Some(ReadmeFile {
                    path: key,
                    content,
                    token_count,
                })
            }
            Err(e) => {
                warnings.push(format!("failed to read {key}: {e}"));
                None
            }
        }
    }
}
