//! Token counting via tiktoken's cl100k_base, cached per content hash.

use std::sync::Arc;

use codescout_core::constants::TOKEN_CACHE_CAPACITY;
use codescout_core::traits::{HeuristicEstimator, TokenEstimator};
use moka::sync::Cache;
use tiktoken_rs::CoreBPE;
use xxhash_rust::xxh3::xxh3_64;

/// Token counter wrapping tiktoken's cl100k_base tokenizer.
///
/// Results are cached per xxh3 content hash for the life of the process;
/// identical content never tokenizes twice. When the tokenizer cannot be
/// loaded, counting degrades to the character-length heuristic instead of
/// failing the request.
pub struct TokenCounter {
    bpe: Option<Arc<CoreBPE>>,
    cache: Cache<u64, usize>,
}

impl TokenCounter {
    /// Create a new TokenCounter with the given cache capacity.
    pub fn new(cache_capacity: u64) -> Self {
        let bpe = match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Some(Arc::new(bpe)),
            Err(e) => {
                tracing::warn!("cl100k_base unavailable, using heuristic estimates: {e}");
                None
            }
        };
        Self {
            bpe,
            cache: Cache::new(cache_capacity),
        }
    }

    /// Count tokens in the given text (uncached).
    pub fn count(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            None => HeuristicEstimator.estimate(text),
        }
    }

    /// Count tokens with content-hash caching.
    /// Safe under concurrent first-write: all writers compute the same value.
    pub fn count_cached(&self, text: &str) -> usize {
        let hash = xxh3_64(text.as_bytes());
        self.cache.get_with(hash, || self.count(text))
    }

    /// Drop every cached count. Content changes are invisible to the hash
    /// key, so this only matters for explicit lifecycle control in tests.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new(TOKEN_CACHE_CAPACITY)
    }
}

impl TokenEstimator for TokenCounter {
    fn estimate(&self, text: &str) -> usize {
        self.count_cached(text)
    }
}
