//! Cooperative interrupt flag shared between the signal listener and the apply loop.
//!
//! Raising the flag never terminates anything by itself. The loop and the
//! editor check it at their next safe point and unwind with an `Interrupted`
//! error, so scoped resources such as the edit buffer are dropped normally.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}
