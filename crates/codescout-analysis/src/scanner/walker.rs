//! Directory walker collecting source files for graph construction.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use codescout_core::config::ScanConfig;
use codescout_core::errors::ScanError;

use super::cancellation::ScanCancellation;
use super::ignores::IgnorePatterns;
use super::language_detect::Language;
use super::types::{ScanResult, ScanStats, SourceFile};

/// File scanner for a single root directory.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    ignores: IgnorePatterns,
}

impl Scanner {
    /// Create a scanner for `root`. Fails if `root` is not a directory.
    pub fn new(root: impl Into<PathBuf>, config: &ScanConfig) -> Result<Self, ScanError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ScanError::RootNotFound { path: root });
        }
        let ignores = IgnorePatterns::new(&root, &config.extra_ignore);
        Ok(Self {
            root,
            config: config.clone(),
            ignores,
        })
    }

    /// Walk the root and collect every supported source file.
    pub fn scan(&self, cancel: Option<&ScanCancellation>) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let mut result = ScanResult {
            root: self.root.clone(),
            files: Vec::new(),
            errors: Vec::new(),
            stats: ScanStats::default(),
        };

        self.walk_dir(&self.root, cancel, &mut result)?;

        // Deterministic output regardless of directory iteration order.
        result.files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in &result.files {
            result.stats.total_bytes += file.size;
            *result
                .stats
                .by_language
                .entry(file.language.name().to_string())
                .or_insert(0) += 1;
        }
        result.stats.total_files = result.files.len();
        result.stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            files = result.stats.total_files,
            skipped = result.stats.files_skipped,
            errors = result.errors.len(),
            "scan complete"
        );

        Ok(result)
    }

    /// Recursively walk a directory.
    fn walk_dir(
        &self,
        dir: &Path,
        cancel: Option<&ScanCancellation>,
        result: &mut ScanResult,
    ) -> Result<(), ScanError> {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            return Err(ScanError::Cancelled);
        }

        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                result
                    .errors
                    .push(format!("failed to read {}: {}", dir.display(), e));
                return Ok(());
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);

            if path.is_dir() {
                if !self.ignores.is_ignored(relative, true) {
                    self.walk_dir(&path, cancel, result)?;
                }
            } else if path.is_file() {
                if self.ignores.is_ignored(relative, false) {
                    continue;
                }
                match self.classify_file(&path, relative) {
                    Ok(Some(file)) => result.files.push(file),
                    Ok(None) => result.stats.files_skipped += 1,
                    Err(e) => result
                        .errors
                        .push(format!("failed to stat {}: {}", path.display(), e)),
                }
            }
        }

        Ok(())
    }

    /// Decide whether a file joins the scan, based on extension and size.
    fn classify_file(
        &self,
        path: &Path,
        relative: &Path,
    ) -> Result<Option<SourceFile>, std::io::Error> {
        let ext = path.extension().and_then(|e| e.to_str());
        let Some(language) = Language::from_extension(ext) else {
            return Ok(None);
        };

        let size = fs::metadata(path)?.len();
        if size > self.config.max_file_size() {
            tracing::debug!(path = %relative.display(), size, "skipping oversized file");
            return Ok(None);
        }

        Ok(Some(SourceFile {
            path: relative.to_path_buf(),
            size,
            language,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn collects_supported_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.py", "x = 1\n");
        write(dir.path(), "a.py", "y = 2\n");
        write(dir.path(), "notes.md", "# notes\n");

        let scanner = Scanner::new(dir.path(), &ScanConfig::default()).unwrap();
        let result = scanner.scan(None).unwrap();

        let paths: Vec<_> = result.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("a.py"), PathBuf::from("b.py")]);
        assert_eq!(result.stats.files_skipped, 1);
    }

    #[test]
    fn skips_ignored_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/app.py", "import os\n");
        write(dir.path(), "__pycache__/app.py", "cached\n");
        write(dir.path(), "node_modules/pkg/index.js", "module.exports = 1\n");

        let scanner = Scanner::new(dir.path(), &ScanConfig::default()).unwrap();
        let result = scanner.scan(None).unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].path, PathBuf::from("src/app.py"));
    }

    #[test]
    fn skips_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "big.py", &"# filler\n".repeat(100));
        write(dir.path(), "small.py", "x = 1\n");

        let config = ScanConfig {
            max_file_size: Some(64),
            ..Default::default()
        };
        let scanner = Scanner::new(dir.path(), &config).unwrap();
        let result = scanner.scan(None).unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].path, PathBuf::from("small.py"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = Scanner::new("/does/not/exist", &ScanConfig::default()).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn cancellation_aborts_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.py", "x = 1\n");

        let scanner = Scanner::new(dir.path(), &ScanConfig::default()).unwrap();
        let cancel = ScanCancellation::new();
        cancel.cancel();
        let err = scanner.scan(Some(&cancel)).unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
    }
}
