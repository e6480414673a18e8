//! The budget allocator — greedy, smallest-first candidate selection.
//!
//! Pure over the graph and precomputed token counts: no I/O happens here.

use codescout_analysis::graph::{FileNode, ImportGraph};
use codescout_core::config::{CandidatePolicy, ContextConfig};
use codescout_core::errors::ContextError;
use codescout_core::types::collections::FxHashSet;

use super::types::{Bundle, BundleEntry, EntryRole, ReadmeFile};
use crate::tokenization::TokenBudget;

/// Token-budgeted selection of context around a target file.
pub struct BudgetAllocator {
    policy: CandidatePolicy,
    include_siblings: bool,
    max_sibling_files: usize,
}

impl BudgetAllocator {
    pub fn new(policy: CandidatePolicy) -> Self {
        Self {
            policy,
            include_siblings: false,
            max_sibling_files: 0,
        }
    }

    /// Enable the sibling list with an inclusion cap.
    pub fn with_siblings(mut self, max_sibling_files: usize) -> Self {
        self.include_siblings = true;
        self.max_sibling_files = max_sibling_files;
        self
    }

    pub fn from_config(config: &ContextConfig) -> Self {
        let allocator = Self::new(config.priority());
        if config.include_siblings() {
            allocator.with_siblings(config.max_sibling_files())
        } else {
            allocator
        }
    }

    /// Assemble a bundle for `target` within `budget` tokens.
    ///
    /// The target and the README (when given) are included unconditionally,
    /// even when they alone exceed the budget. Candidates are then tested
    /// greedily: imports of the target, importers of the target, then
    /// same-directory siblings, each list sorted ascending by token count
    /// with lexical path order breaking ties. A candidate that does not fit
    /// is skipped, not a stopping condition.
    pub fn allocate(
        &self,
        target: &str,
        graph: &ImportGraph,
        budget: usize,
        readme: Option<ReadmeFile>,
    ) -> Result<Bundle, ContextError> {
        let target_node = graph.get(target).ok_or_else(|| ContextError::TargetNotFound {
            path: target.into(),
        })?;

        let token_budget = TokenBudget::new(budget);
        let mut included: FxHashSet<String> = FxHashSet::default();
        let mut entries: Vec<BundleEntry> = Vec::new();

        // Mandatory baseline: the target itself, then its documentation.
        let mut used = target_node.token_count;
        included.insert(target_node.path.clone());
        entries.push(entry_for(target_node, EntryRole::Target));

        if let Some(readme) = readme {
            used += readme.token_count;
            included.insert(readme.path.clone());
            entries.push(BundleEntry {
                path: readme.path,
                content: readme.content,
                token_count: readme.token_count,
                role: EntryRole::Readme,
            });
        }

        let (first, second) = match self.policy {
            CandidatePolicy::ImportsFirst => {
                ((&target_node.imports, EntryRole::Import), (&target_node.imported_by, EntryRole::Importer))
            }
            CandidatePolicy::ImportersFirst => {
                ((&target_node.imported_by, EntryRole::Importer), (&target_node.imports, EntryRole::Import))
            }
        };

        // Candidate lists are rebuilt after each pass so that anything the
        // first list admitted is excluded from the second.
        let candidates = sorted_candidates(first.0.iter(), graph, &included);
        self.fill(&candidates, first.1, &token_budget, &mut used, &mut entries, &mut included, None);

        let candidates = sorted_candidates(second.0.iter(), graph, &included);
        self.fill(&candidates, second.1, &token_budget, &mut used, &mut entries, &mut included, None);

        if self.include_siblings {
            let dir = parent_dir(target);
            let sibling_paths: Vec<&String> = {
                let mut paths: Vec<&String> = graph
                    .nodes()
                    .filter(|n| parent_dir(&n.path) == dir)
                    .map(|n| &n.path)
                    .collect();
                paths.sort();
                paths
            };
            let candidates = sorted_candidates(sibling_paths.into_iter(), graph, &included);
            self.fill(
                &candidates,
                EntryRole::Sibling,
                &token_budget,
                &mut used,
                &mut entries,
                &mut included,
                Some(self.max_sibling_files),
            );
        }

        Ok(Bundle {
            entries,
            used_tokens: used,
            budget,
        })
    }

    /// Greedily admit candidates in order. Every candidate is tested; a
    /// misfit is skipped so equal-size ties behave uniformly.
    #[allow(clippy::too_many_arguments)]
    fn fill(
        &self,
        candidates: &[&FileNode],
        role: EntryRole,
        budget: &TokenBudget,
        used: &mut usize,
        entries: &mut Vec<BundleEntry>,
        included: &mut FxHashSet<String>,
        cap: Option<usize>,
    ) {
        let mut admitted = 0usize;
        for node in candidates {
            if cap.is_some_and(|cap| admitted >= cap) {
                break;
            }
            if budget.fits(*used, node.token_count) {
                *used += node.token_count;
                included.insert(node.path.clone());
                entries.push(entry_for(node, role));
                admitted += 1;
            }
        }
    }
}

/// Resolve candidate paths to nodes, drop anything already included, and
/// order ascending by token count with lexical path tiebreak.
fn sorted_candidates<'g, 'a, I>(
    paths: I,
    graph: &'g ImportGraph,
    included: &FxHashSet<String>,
) -> Vec<&'g FileNode>
where
    I: Iterator<Item = &'a String>,
{
    let mut nodes: Vec<&FileNode> = paths
        .filter(|p| !included.contains(p.as_str()))
        .filter_map(|p| graph.get(p))
        .collect();
    nodes.sort_by(|a, b| {
        a.token_count
            .cmp(&b.token_count)
            .then_with(|| a.path.cmp(&b.path))
    });
    nodes
}

fn entry_for(node: &FileNode, role: EntryRole) -> BundleEntry {
    BundleEntry {
        path: node.path.clone(),
        content: node.content.clone(),
        token_count: node.token_count,
        role,
    }
}

/// Directory portion of a `/`-separated path; empty at the root.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}
