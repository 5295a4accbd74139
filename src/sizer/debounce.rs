//! Single-slot trailing-edge debounce.
//!
//! A burst of calls collapses into one pending call carrying the most recent
//! arguments; nothing fires before the quiet period elapses, and every call
//! resets the deadline. The caller supplies time, so there is no timer here:
//! an embedding layer schedules a wake-up for [`deadline_ms`](Debouncer::deadline_ms)
//! and [`poll`](Debouncer::poll)s when it fires.

use crate::layout::CellIndex;

/// Holder for a single debounced re-layout call.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: f64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    origin: CellIndex,
    due_ms: f64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms: f64::from(delay_ms),
            pending: None,
        }
    }

    /// Arm (or re-arm) the pending call; any previous pending call and its
    /// deadline are superseded.
    pub fn call(&mut self, now_ms: f64, origin: CellIndex) {
        self.pending = Some(Pending {
            origin,
            due_ms: now_ms + self.delay_ms,
        });
    }

    /// Consume and return the pending call if its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<CellIndex> {
        match self.pending {
            Some(pending) if pending.due_ms <= now_ms => {
                self.pending = None;
                Some(pending.origin)
            }
            _ => None,
        }
    }

    /// Drop the pending call without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a call is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending call, if any.
    pub fn deadline_ms(&self) -> Option<f64> {
        self.pending.map(|pending| pending.due_ms)
    }
}
