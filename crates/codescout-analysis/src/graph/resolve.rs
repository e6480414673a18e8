//! Import-to-path resolution against the scanned file set.
//!
//! Resolution is membership-based: a candidate path counts only if it names a
//! file the scanner actually collected. Everything else is treated as an
//! external package and dropped without error.

use codescout_core::types::collections::FxHashSet;

use crate::parsers::types::{ImportKind, RawImport};
use crate::scanner::language_detect::Language;

const ECMA_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Resolve one raw import to a scanned file, or `None` if it is external.
pub fn resolve_import(
    raw: &RawImport,
    importer: &str,
    language: Language,
    known: &FxHashSet<String>,
) -> Option<String> {
    match language {
        Language::Python => resolve_python(raw, importer, known),
        Language::TypeScript | Language::JavaScript => resolve_ecma(raw, importer, known),
    }
}

/// Python module-to-path mapping: `a.b` → `a/b.py` | `a/b/__init__.py`,
/// relative imports walk up one directory per extra leading dot, and
/// `from pkg import name` may name a submodule file.
fn resolve_python(raw: &RawImport, importer: &str, known: &FxHashSet<String>) -> Option<String> {
    let dir = parent_dir(importer);
    let mut candidates: Vec<String> = Vec::new();

    match &raw.kind {
        ImportKind::Module => {
            let rel = raw.module.replace('.', "/");
            candidates.push(format!("{rel}.py"));
            candidates.push(format!("{rel}/__init__.py"));
            for name in &raw.names {
                candidates.push(format!("{rel}/{name}.py"));
            }
            // Flat-layout fallback: a module living next to its importer.
            if let Some(last) = raw.module.rsplit('.').next() {
                candidates.push(join(dir, &format!("{last}.py")));
            }
        }
        ImportKind::RelativeModule { dots } => {
            let mut base = dir.to_string();
            for _ in 1..*dots {
                base = parent_dir(&base).to_string();
            }
            if raw.module.is_empty() {
                // `from . import name` names sibling modules directly.
                for name in &raw.names {
                    candidates.push(join(&base, &format!("{name}.py")));
                }
                candidates.push(join(&base, "__init__.py"));
            } else {
                let rel = raw.module.replace('.', "/");
                candidates.push(join(&base, &format!("{rel}.py")));
                candidates.push(join(&base, &format!("{rel}/__init__.py")));
                for name in &raw.names {
                    candidates.push(join(&base, &format!("{rel}/{name}.py")));
                }
            }
        }
        ImportKind::Path => return None,
    }

    first_known(candidates, known)
}

/// TS/JS specifier resolution: exact path, extension probing, then
/// `index.*`. A `.js` specifier may resolve to the `.ts` source it compiles
/// from. Bare specifiers are external packages.
fn resolve_ecma(raw: &RawImport, importer: &str, known: &FxHashSet<String>) -> Option<String> {
    if raw.kind != ImportKind::Path {
        return None;
    }

    let dir = parent_dir(importer);
    let joined = normalize(&join(dir, &raw.module))?;
    let mut candidates: Vec<String> = Vec::new();

    if has_ecma_extension(&joined) {
        candidates.push(joined.clone());
        if let Some(stem) = joined.strip_suffix(".js") {
            candidates.push(format!("{stem}.ts"));
            candidates.push(format!("{stem}.tsx"));
        } else if let Some(stem) = joined.strip_suffix(".mjs") {
            candidates.push(format!("{stem}.mts"));
        } else if let Some(stem) = joined.strip_suffix(".cjs") {
            candidates.push(format!("{stem}.cts"));
        }
    }
    for ext in ECMA_EXTENSIONS {
        candidates.push(format!("{joined}.{ext}"));
    }
    for ext in ECMA_EXTENSIONS {
        candidates.push(format!("{joined}/index.{ext}"));
    }

    first_known(candidates, known)
}

fn first_known(candidates: Vec<String>, known: &FxHashSet<String>) -> Option<String> {
    candidates
        .into_iter()
        .find(|c| !c.is_empty() && known.contains(c.as_str()))
}

/// Directory portion of a `/`-separated path; empty at the root.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

fn join(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

/// Collapse `.` and `..` segments; `None` when the path escapes the root.
fn normalize(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

fn has_ecma_extension(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .is_some_and(|ext| ECMA_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codescout_core::types::collections::SmallVec4;

    fn known(paths: &[&str]) -> FxHashSet<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn import(module: &str, kind: ImportKind) -> RawImport {
        RawImport {
            module: module.to_string(),
            names: SmallVec4::new(),
            kind,
            line: 1,
        }
    }

    fn import_with_names(module: &str, kind: ImportKind, names: &[&str]) -> RawImport {
        RawImport {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..import(module, kind)
        }
    }

    #[test]
    fn python_dotted_module_maps_to_file() {
        let known = known(&["pkg/mod.py"]);
        let raw = import("pkg.mod", ImportKind::Module);
        assert_eq!(
            resolve_import(&raw, "main.py", Language::Python, &known),
            Some("pkg/mod.py".to_string())
        );
    }

    #[test]
    fn python_package_maps_to_init() {
        let known = known(&["pkg/__init__.py"]);
        let raw = import("pkg", ImportKind::Module);
        assert_eq!(
            resolve_import(&raw, "main.py", Language::Python, &known),
            Some("pkg/__init__.py".to_string())
        );
    }

    #[test]
    fn python_from_import_names_a_submodule() {
        let known = known(&["pkg/helpers.py"]);
        let raw = import_with_names("pkg", ImportKind::Module, &["helpers"]);
        assert_eq!(
            resolve_import(&raw, "main.py", Language::Python, &known),
            Some("pkg/helpers.py".to_string())
        );
    }

    #[test]
    fn python_same_directory_fallback() {
        let known = known(&["src/util.py"]);
        let raw = import("util", ImportKind::Module);
        assert_eq!(
            resolve_import(&raw, "src/app.py", Language::Python, &known),
            Some("src/util.py".to_string())
        );
    }

    #[test]
    fn python_relative_single_dot() {
        let known = known(&["pkg/sibling.py"]);
        let raw = import_with_names("", ImportKind::RelativeModule { dots: 1 }, &["sibling"]);
        assert_eq!(
            resolve_import(&raw, "pkg/app.py", Language::Python, &known),
            Some("pkg/sibling.py".to_string())
        );
    }

    #[test]
    fn python_relative_double_dot_walks_up() {
        let known = known(&["shared/util.py"]);
        let raw = import("shared.util", ImportKind::RelativeModule { dots: 2 });
        assert_eq!(
            resolve_import(&raw, "pkg/app.py", Language::Python, &known),
            Some("shared/util.py".to_string())
        );
    }

    #[test]
    fn python_external_module_is_dropped() {
        let known = known(&["main.py"]);
        let raw = import("os", ImportKind::Module);
        assert_eq!(resolve_import(&raw, "main.py", Language::Python, &known), None);
    }

    #[test]
    fn ecma_extension_probing() {
        let known = known(&["src/util.ts"]);
        let raw = import("./util", ImportKind::Path);
        assert_eq!(
            resolve_import(&raw, "src/app.ts", Language::TypeScript, &known),
            Some("src/util.ts".to_string())
        );
    }

    #[test]
    fn ecma_index_probing() {
        let known = known(&["src/widgets/index.ts"]);
        let raw = import("./widgets", ImportKind::Path);
        assert_eq!(
            resolve_import(&raw, "src/app.ts", Language::TypeScript, &known),
            Some("src/widgets/index.ts".to_string())
        );
    }

    #[test]
    fn ecma_js_specifier_resolves_to_ts_source() {
        let known = known(&["src/util.ts"]);
        let raw = import("./util.js", ImportKind::Path);
        assert_eq!(
            resolve_import(&raw, "src/app.ts", Language::TypeScript, &known),
            Some("src/util.ts".to_string())
        );
    }

    #[test]
    fn ecma_parent_directory_specifier() {
        let known = known(&["shared/api.ts"]);
        let raw = import("../shared/api", ImportKind::Path);
        assert_eq!(
            resolve_import(&raw, "src/app.ts", Language::TypeScript, &known),
            Some("shared/api.ts".to_string())
        );
    }

    #[test]
    fn ecma_escape_above_root_is_dropped() {
        let known = known(&["app.ts"]);
        let raw = import("../../outside", ImportKind::Path);
        assert_eq!(
            resolve_import(&raw, "app.ts", Language::TypeScript, &known),
            None
        );
    }

    #[test]
    fn ecma_bare_specifier_is_external() {
        let known = known(&["react.js"]);
        let raw = import("react", ImportKind::Module);
        assert_eq!(
            resolve_import(&raw, "app.js", Language::JavaScript, &known),
            None
        );
    }
}
