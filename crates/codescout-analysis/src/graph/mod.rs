//! Import graph — directed importer/imported relationships over a source tree.

pub mod builder;
pub mod resolve;
pub mod types;

pub use builder::{path_key, GraphBuilder};
pub use types::{FileNode, GraphResult, GraphStats, ImportGraph};
