//! Scanner subsystem — file discovery with ignore patterns and size limits.
//!
//! The scanner is the entry point to graph construction. It walks the root
//! directory, applies ignore patterns, and collects every file whose
//! extension maps to a supported language. Heavy per-file work (reading,
//! parsing, token counting) happens downstream in the graph builder.

pub mod cancellation;
pub mod ignores;
pub mod language_detect;
pub mod types;
pub mod walker;

pub use cancellation::ScanCancellation;
pub use language_detect::Language;
pub use types::{ScanResult, ScanStats, SourceFile};
pub use walker::Scanner;
