//! Viewport-change coordination and debounced re-layout triggering.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Debouncer, GridHost, SharedState};
use crate::config::{EstimatorConfig, ResizeStrategy};
use crate::layout::{CellIndex, Viewport};

/// Receives viewport-change notifications from the host grid and schedules
/// debounced re-layout calls back into it.
///
/// The host handle is late-bound and optional: effects that come due while it
/// is absent are dropped, not queued.
pub struct ViewportCoordinator {
    config: Rc<EstimatorConfig>,
    state: Rc<RefCell<SharedState>>,
    debounce: Debouncer,
    host: Option<Rc<dyn GridHost>>,
}

impl ViewportCoordinator {
    pub(crate) fn new(config: Rc<EstimatorConfig>, state: Rc<RefCell<SharedState>>) -> Self {
        let debounce = Debouncer::new(config.debounce_delay_ms);
        Self {
            config,
            state,
            debounce,
            host: None,
        }
    }

    /// Attach the host grid re-layout handle.
    pub fn set_host(&mut self, host: Rc<dyn GridHost>) {
        self.host = Some(host);
    }

    /// Mark the first stable layout as complete. One-way: the initial layout
    /// pass already computed widths, so only changes after this point may
    /// trigger recalculation.
    pub fn mark_mounted(&mut self) {
        self.state.borrow_mut().mounted = true;
    }

    /// Handle a new visible region from the host grid.
    ///
    /// The cached viewport is replaced before the suppression decision so the
    /// estimator reflects the latest scroll position even when no re-layout
    /// is triggered.
    pub fn on_viewport_change(&mut self, now_ms: f64, next: Viewport) {
        let (prev, mounted) = {
            let mut state = self.state.borrow_mut();
            let prev = state.viewport;
            state.viewport = next;
            (prev, state.mounted)
        };
        if self.suppresses(&prev, &next, mounted) {
            return;
        }
        self.debounce.call(now_ms, next.origin());
    }

    /// Fire the pending re-layout call if its quiet period has elapsed.
    /// Returns true when a call was delivered to the host.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if let Some((host, origin)) = self.take_due(now_ms) {
            host.reset_after_indices(origin);
            return true;
        }
        false
    }

    /// Consume the pending call if due, returning the host handle and origin
    /// so the caller can invoke outside any shared borrow.
    ///
    /// A due call with no host attached is consumed and dropped.
    pub fn take_due(&mut self, now_ms: f64) -> Option<(Rc<dyn GridHost>, CellIndex)> {
        let origin = self.debounce.poll(now_ms)?;
        let host = self.host.as_ref()?;
        Some((Rc::clone(host), origin))
    }

    /// Deadline of the pending re-layout call, if any.
    pub fn deadline_ms(&self) -> Option<f64> {
        self.debounce.deadline_ms()
    }

    /// Whether a re-layout call is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// The currently cached viewport.
    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    /// Whether the first stable layout has completed.
    pub fn mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    fn suppresses(&self, prev: &Viewport, next: &Viewport, mounted: bool) -> bool {
        // Full strategy already sampled every row; scrolling exposes nothing new.
        if self.config.resize_strategy == ResizeStrategy::Full {
            return true;
        }
        if !self.config.recalculate_on_scroll {
            return true;
        }
        // Sub-row scrolls and stop-only changes keep both start indices; not
        // a boundary crossing.
        if next.same_origin(prev) {
            return true;
        }
        // The initial layout pass computes widths itself.
        !mounted
    }
}
