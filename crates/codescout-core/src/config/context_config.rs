//! Context-assembly configuration: budget, baseline, candidate policy, format.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_SIBLING_FILES, DEFAULT_TOKEN_BUDGET};

/// Which candidate list is processed first when filling the budget.
///
/// `ImportsFirst` favors files the target depends on over files that depend
/// on the target. This ordering is a policy, not a law: swap it when the
/// consumer cares more about callers than callees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    #[default]
    ImportsFirst,
    ImportersFirst,
}

impl CandidatePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImportsFirst => "imports_first",
            Self::ImportersFirst => "importers_first",
        }
    }
}

impl std::fmt::Display for CandidatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output rendering format for the assembled bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Plain,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Context-assembly configuration. `None` fields fall back to compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContextConfig {
    /// Hard token budget for an assembled bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_budget: Option<usize>,
    /// Whether a colocated README joins the mandatory baseline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_readme: Option<bool>,
    /// Whether same-directory files are considered after imports/importers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_siblings: Option<bool>,
    /// Cap on sibling files included per bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sibling_files: Option<usize>,
    /// Candidate list ordering policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CandidatePolicy>,
    /// Bundle rendering format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl ContextConfig {
    pub fn token_budget(&self) -> usize {
        self.token_budget.unwrap_or(DEFAULT_TOKEN_BUDGET)
    }

    pub fn include_readme(&self) -> bool {
        self.include_readme.unwrap_or(true)
    }

    pub fn include_siblings(&self) -> bool {
        self.include_siblings.unwrap_or(true)
    }

    pub fn max_sibling_files(&self) -> usize {
        self.max_sibling_files.unwrap_or(DEFAULT_MAX_SIBLING_FILES)
    }

    pub fn priority(&self) -> CandidatePolicy {
        self.priority.unwrap_or_default()
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}
