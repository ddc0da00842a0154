//! Cooperative cancellation for long solves

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag that asks a running solve to stop.
///
/// Clones share the same flag, so a token handed to a solver can be
/// triggered from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
