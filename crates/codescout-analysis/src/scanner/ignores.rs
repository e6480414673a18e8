//! Default ignore patterns for source-tree scanning.
//!
//! These exclude dependency trees, caches, build output, and generated files
//! so the import graph only covers code the project authors wrote.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Directories that never contribute to the import graph.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules",
    ".pnpm",
    ".yarn",
    "bower_components",
    // Python
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".env",
    "virtualenv",
    "site-packages",
    "dist-packages",
    ".eggs",
    "*.egg-info",
    ".tox",
    ".pytest_cache",
    ".mypy_cache",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE/Editor
    ".idea",
    ".vscode",
    // Build outputs
    "dist",
    "build",
    "out",
    "_build",
    ".next",
    ".nuxt",
    ".turbo",
    // Coverage
    "coverage",
    ".nyc_output",
    "htmlcov",
    // Caches and temp
    ".cache",
    "tmp",
    "temp",
];

/// File patterns that never contribute to the import graph.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    // Compiled / generated
    "*.pyc",
    "*.pyo",
    "*.min.js",
    "*.map",
    "*.d.ts",
    // Lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
];

/// Compiled ignore matcher: defaults + config extras + on-disk ignore files.
#[derive(Debug)]
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Create ignore patterns from defaults + custom patterns.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            let _ = builder.add_line(None, pattern);
        }
        for pattern in DEFAULT_IGNORE_FILES {
            let _ = builder.add_line(None, pattern);
        }
        for pattern in extra_patterns {
            let _ = builder.add_line(None, pattern);
        }

        // Honor project-level ignore files when present.
        let codescoutignore = root.join(".codescoutignore");
        if codescoutignore.exists() {
            let _ = builder.add(&codescoutignore);
        }
        let gitignore = root.join(".gitignore");
        if gitignore.exists() {
            let _ = builder.add(&gitignore);
        }

        Self {
            gitignore: builder.build().unwrap_or_else(|_| Gitignore::empty()),
        }
    }

    /// Check if a root-relative path should be ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn ignores_dependency_dirs() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &[]);

        assert!(patterns.is_ignored(Path::new("node_modules"), true));
        assert!(patterns.is_ignored(Path::new("src/__pycache__"), true));
        assert!(patterns.is_ignored(Path::new(".venv"), true));
    }

    #[test]
    fn ignores_generated_files() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &[]);

        assert!(patterns.is_ignored(Path::new("module.pyc"), false));
        assert!(patterns.is_ignored(Path::new("bundle.min.js"), false));
        assert!(patterns.is_ignored(Path::new("types.d.ts"), false));
    }

    #[test]
    fn allows_source_files() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &[]);

        assert!(!patterns.is_ignored(Path::new("src/main.ts"), false));
        assert!(!patterns.is_ignored(Path::new("lib/utils.py"), false));
    }

    #[test]
    fn extra_patterns_are_honored() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &["generated/".to_string()]);

        assert!(patterns.is_ignored(Path::new("generated"), true));
    }
}
