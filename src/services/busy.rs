//! Busy indicator
//!
//! A shared flag that is on while a request is outstanding. Operations take a
//! `BusyGuard` for their whole body; dropping the guard turns the flag off, so
//! every exit path (success, failure, early return) releases it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    on: Arc<AtomicBool>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    /// Turn the flag on until the returned guard is dropped
    pub fn acquire(&self) -> BusyGuard {
        self.on.store(true, Ordering::Release);
        BusyGuard {
            on: Arc::clone(&self.on),
        }
    }
}

/// Keeps the busy flag on while alive
#[must_use = "the busy flag is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    on: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.on.store(false, Ordering::Release);
    }
}
