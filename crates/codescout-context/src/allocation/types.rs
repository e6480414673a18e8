//! Bundle types — the ordered output of budget allocation.

use serde::{Deserialize, Serialize};

/// Why an entry is in the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRole {
    /// The requested file. Always present, always first.
    Target,
    /// Documentation colocated with the target. Part of the baseline.
    Readme,
    /// A file the target imports.
    Import,
    /// A file that imports the target.
    Importer,
    /// A file sharing the target's directory.
    Sibling,
}

impl EntryRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Readme => "readme",
            Self::Import => "import",
            Self::Importer => "importer",
            Self::Sibling => "related",
        }
    }
}

impl std::fmt::Display for EntryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One file included in a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    pub path: String,
    pub content: String,
    pub token_count: usize,
    pub role: EntryRole,
}

/// A README picked up by the locator, priced and ready for the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeFile {
    pub path: String,
    pub content: String,
    pub token_count: usize,
}

/// The ordered result of one allocation: target, readme, then selected
/// candidates in selection order. Immutable once returned.
///
/// `used_tokens <= budget` holds whenever the baseline alone fits; a
/// baseline that exceeds the budget is still included, and `over_budget`
/// reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub entries: Vec<BundleEntry>,
    pub used_tokens: usize,
    pub budget: usize,
}

impl Bundle {
    /// True when the mandatory baseline alone exceeded the budget.
    pub fn over_budget(&self) -> bool {
        self.used_tokens > self.budget
    }

    /// The target entry.
    pub fn target(&self) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.role == EntryRole::Target)
    }

    /// Number of entries included with the given role.
    pub fn count_role(&self, role: EntryRole) -> usize {
        self.entries.iter().filter(|e| e.role == role).count()
    }

    /// Paths in bundle order.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }
}
