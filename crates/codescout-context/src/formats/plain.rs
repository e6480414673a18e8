//! Plain-text output format.

use crate::allocation::Bundle;

/// Plain-text formatter with `====` file delimiters.
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format a bundle as delimited plain text in bundle order.
    pub fn format(&self, bundle: &Bundle) -> String {
        let mut out = String::new();
        if let Some(target) = bundle.target() {
            out.push_str(&format!(
                "Context bundle for {} ({} / {} tokens)\n\n",
                target.path, bundle.used_tokens, bundle.budget
            ));
        }

        for entry in &bundle.entries {
            out.push_str(&format!("==== {} [{}] ====\n", entry.path, entry.role));
            out.push_str(&entry.content);
            if !entry.content.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}
