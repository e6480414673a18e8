//! README discovery colocated with a target file.

use std::fs;
use std::path::{Path, PathBuf};

/// Recognized documentation filenames, most structured format first.
/// Matching is case-insensitive; priority order is fixed.
const README_PRIORITY: &[&str] = &["readme.md", "readme.rst", "readme.txt", "readme"];

/// Find a README variant in the same directory as `target_path`.
///
/// Does not search parent or child directories. Within one priority rank,
/// ties (e.g. `README.md` vs `readme.md`) resolve to the lexically smallest
/// filename so repeated calls agree.
pub fn find_readme(target_path: &Path) -> Option<PathBuf> {
    let dir = target_path.parent()?;
    let entries = fs::read_dir(dir).ok()?;

    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();

    for candidate in README_PRIORITY {
        if let Some(name) = names.iter().find(|n| n.to_lowercase() == *candidate) {
            return Some(dir.join(name));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "docs\n").unwrap();
    }

    #[test]
    fn finds_readme_md_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.txt");
        touch(dir.path(), "README.md");
        touch(dir.path(), "main.py");

        let found = find_readme(&dir.path().join("main.py")).unwrap();
        assert_eq!(found.file_name().unwrap(), "README.md");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ReadMe.Md");
        touch(dir.path(), "main.py");

        let found = find_readme(&dir.path().join("main.py")).unwrap();
        assert_eq!(found.file_name().unwrap(), "ReadMe.Md");
    }

    #[test]
    fn bare_readme_is_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README");
        touch(dir.path(), "main.py");

        let found = find_readme(&dir.path().join("main.py")).unwrap();
        assert_eq!(found.file_name().unwrap(), "README");
    }

    #[test]
    fn none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.py");
        assert!(find_readme(&dir.path().join("main.py")).is_none());
    }

    #[test]
    fn does_not_search_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.md");
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "main.py");

        assert!(find_readme(&dir.path().join("sub/main.py")).is_none());
    }
}
