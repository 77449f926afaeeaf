//! View lifetime tracking.
//!
//! Continuations of in-flight work (feed responses, delayed popups) check
//! the token before touching shared state, so anything that resolves after
//! teardown becomes a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "is the view still mounted" flag.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the view as torn down. Irreversible.
    pub fn tear_down(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
