//! Cancellation support for scan operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation handle for scan and graph-build operations.
///
/// Wraps an `AtomicBool` that can be shared across threads. The walker checks
/// it between directories; the graph builder checks it between phases.
#[derive(Debug, Clone, Default)]
pub struct ScanCancellation {
    flag: Arc<AtomicBool>,
}

impl ScanCancellation {
    /// Create a new cancellation handle (not cancelled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_cancelled() {
        assert!(!ScanCancellation::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let handle = ScanCancellation::new();
        let clone = handle.clone();
        handle.cancel();
        assert!(clone.is_cancelled());
    }
}
