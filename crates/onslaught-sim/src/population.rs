//! Live population counter shared between the wave scheduler and the
//! external health collaborator.
//!
//! Cloning yields another handle to the same counter, so a host can report
//! deaths from a different execution context than the scheduler's tick.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Population(Arc<AtomicU32>);

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live agents.
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }

    pub fn report_spawn(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    /// Decrement, floored at zero.
    pub fn report_death(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_sub(1))
            });
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Release);
    }
}
