//! Configuration system for codescout.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod codescout_config;
pub mod context_config;
pub mod scan_config;

pub use codescout_config::{CliOverrides, CodescoutConfig};
pub use context_config::{CandidatePolicy, ContextConfig, OutputFormat};
pub use scan_config::ScanConfig;
