//! Output formats for assembled bundles.

pub mod markdown;
pub mod plain;

use codescout_core::config::OutputFormat;

use crate::allocation::Bundle;

pub use markdown::MarkdownFormatter;
pub use plain::PlainFormatter;

/// Render a bundle with the configured format.
pub fn render(format: OutputFormat, bundle: &Bundle) -> String {
    match format {
        OutputFormat::Markdown => MarkdownFormatter::new().format(bundle),
        OutputFormat::Plain => PlainFormatter::new().format(bundle),
    }
}
