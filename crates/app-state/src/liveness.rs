//! Per-view liveness flag
//!
//! Asynchronous work started by a view may complete after the view is gone.
//! Each view owns a [`Liveness`] and every continuation checks it before
//! touching view state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Liveness flag shared between a view and its in-flight work
///
/// Starts alive and is set false exactly once, at teardown.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    /// Create a live flag
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    /// Whether the owning view is still mounted
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the owning view torn down
    ///
    /// Returns `true` only for the call that ended liveness.
    pub fn teardown(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }
}
