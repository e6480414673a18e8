//! Top-level codescout configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CandidatePolicy, ContextConfig, OutputFormat, ScanConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CODESCOUT_*`)
/// 3. Project config (`codescout.toml` in project root)
/// 4. User config (`~/.codescout/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodescoutConfig {
    pub scan: ScanConfig,
    pub context: ContextConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub token_budget: Option<usize>,
    pub include_readme: Option<bool>,
    pub scan_max_file_size: Option<u64>,
    pub scan_threads: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl CodescoutConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                // A broken user config must not take down every project.
                if let Err(e) = Self::merge_toml_file(&mut config, &user_config_path) {
                    tracing::warn!("ignoring user config: {e}");
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("codescout.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CodescoutConfig) -> Result<(), ConfigError> {
        if let Some(budget) = config.context.token_budget {
            if budget == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "context.token_budget".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.codescout/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".codescout").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut CodescoutConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: CodescoutConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut CodescoutConfig, other: &CodescoutConfig) {
        // Scan
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }

        // Context
        if other.context.token_budget.is_some() {
            base.context.token_budget = other.context.token_budget;
        }
        if other.context.include_readme.is_some() {
            base.context.include_readme = other.context.include_readme;
        }
        if other.context.include_siblings.is_some() {
            base.context.include_siblings = other.context.include_siblings;
        }
        if other.context.max_sibling_files.is_some() {
            base.context.max_sibling_files = other.context.max_sibling_files;
        }
        if other.context.priority.is_some() {
            base.context.priority = other.context.priority;
        }
        if other.context.format.is_some() {
            base.context.format = other.context.format;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CODESCOUT_TOKEN_BUDGET`, `CODESCOUT_SCAN_THREADS`, etc.
    fn apply_env_overrides(config: &mut CodescoutConfig) {
        if let Ok(val) = std::env::var("CODESCOUT_TOKEN_BUDGET") {
            if let Ok(v) = val.parse::<usize>() {
                config.context.token_budget = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CODESCOUT_INCLUDE_README") {
            if let Ok(v) = val.parse::<bool>() {
                config.context.include_readme = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CODESCOUT_PRIORITY") {
            match val.as_str() {
                "imports_first" => config.context.priority = Some(CandidatePolicy::ImportsFirst),
                "importers_first" => {
                    config.context.priority = Some(CandidatePolicy::ImportersFirst)
                }
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("CODESCOUT_FORMAT") {
            match val.as_str() {
                "markdown" => config.context.format = Some(OutputFormat::Markdown),
                "plain" => config.context.format = Some(OutputFormat::Plain),
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("CODESCOUT_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CODESCOUT_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut CodescoutConfig, cli: &CliOverrides) {
        if let Some(v) = cli.token_budget {
            config.context.token_budget = Some(v);
        }
        if let Some(v) = cli.include_readme {
            config.context.include_readme = Some(v);
        }
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.format {
            config.context.format = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
