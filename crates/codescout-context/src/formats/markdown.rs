//! Markdown output format.

use crate::allocation::{Bundle, EntryRole};

/// Markdown formatter for bundle output.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format a bundle as Markdown, one section per file in bundle order.
    pub fn format(&self, bundle: &Bundle) -> String {
        let mut md = String::new();
        if let Some(target) = bundle.target() {
            md.push_str(&format!("# Context: {}\n\n", escape_markdown_header(&target.path)));
        }
        md.push_str(&format!(
            "*Tokens used: {} / budget: {}*\n\n",
            bundle.used_tokens, bundle.budget
        ));

        for entry in &bundle.entries {
            let label = match entry.role {
                EntryRole::Target => " (target)".to_string(),
                role => format!(" ({})", role.name()),
            };
            md.push_str(&format!(
                "## {}{}\n\n",
                escape_markdown_header(&entry.path),
                label
            ));
            md.push_str(&entry.content);
            if !entry.content.ends_with('\n') {
                md.push('\n');
            }
            md.push('\n');
        }

        md
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape markdown injection in headers.
fn escape_markdown_header(s: &str) -> String {
    s.replace('#', "\\#").replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::BundleEntry;

    fn bundle() -> Bundle {
        Bundle {
            entries: vec![
                BundleEntry {
                    path: "main.py".to_string(),
                    content: "import util\n".to_string(),
                    token_count: 3,
                    role: EntryRole::Target,
                },
                BundleEntry {
                    path: "util.py".to_string(),
                    content: "def run(): pass\n".to_string(),
                    token_count: 6,
                    role: EntryRole::Import,
                },
            ],
            used_tokens: 9,
            budget: 100,
        }
    }

    #[test]
    fn renders_headers_and_content() {
        let md = MarkdownFormatter::new().format(&bundle());
        assert!(md.contains("# Context: main.py"));
        assert!(md.contains("## main.py (target)"));
        assert!(md.contains("## util.py (import)"));
        assert!(md.contains("import util\n"));
        assert!(md.contains("*Tokens used: 9 / budget: 100*"));
    }

    #[test]
    fn header_escaping_blocks_injection() {
        let escaped = escape_markdown_header("## Injected\n\nHeader");
        assert!(!escaped.contains('\n'));
        assert!(escaped.contains("\\#\\# Injected"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let b = bundle();
        assert_eq!(
            MarkdownFormatter::new().format(&b),
            MarkdownFormatter::new().format(&b)
        );
    }
}
