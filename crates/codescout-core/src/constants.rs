//! Shared constants for the codescout context engine.

/// codescout version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default token budget for an assembled bundle.
pub const DEFAULT_TOKEN_BUDGET: usize = 8000;

/// Maximum file size in bytes for scanning (default: 1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Default number of threads (0 = auto-detect).
pub const DEFAULT_THREADS: usize = 0;

/// Default cap on sibling files added after imports and importers.
pub const DEFAULT_MAX_SIBLING_FILES: usize = 5;

/// Default capacity of the token-count cache (entries).
pub const TOKEN_CACHE_CAPACITY: u64 = 10_000;

/// Characters per token for the fallback estimate.
pub const HEURISTIC_CHARS_PER_TOKEN: usize = 4;
