//! Cooperative cancellation for long-running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop signal checked by the miner before every attempt.
///
/// Clones observe the same flag. Once raised it stays raised.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Every search holding a clone stops at its next
    /// attempt.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        // Polled in the hot loop; a late observation costs one attempt.
        self.cancelled.load(Ordering::Relaxed)
    }
}
