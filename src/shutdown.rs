//! Cooperative cancellation
//!
//! The watcher and consumer are long-running loops with no terminal state of
//! their own; the owner stops them through a shared token. Both loops check
//! the token once per iteration, so cancellation lands at the next loop
//! boundary, never mid-message.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A clonable stop signal shared between a loop and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
