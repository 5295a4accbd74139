//! Core sizing logic: width estimation and viewport-change coordination.
//!
//! The two halves share one piece of state, the cached [`Viewport`] and the
//! mounted flag, behind `Rc<RefCell<_>>`: the coordinator writes it on every
//! host notification, the estimator reads it on every width query. Everything
//! here is target independent; time enters through explicit `now_ms`
//! parameters so tests drive it deterministically.

mod coordinator;
mod debounce;
mod estimator;

pub use coordinator::ViewportCoordinator;
pub use debounce::Debouncer;
pub use estimator::WidthEstimator;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EstimatorConfig;
use crate::error::Result;
use crate::layout::{CellIndex, Viewport};
use crate::measure::{CachedMeasurer, TextMeasurer};

/// Cell value accessor provided by the host grid.
pub trait CellValues {
    /// Display text of the cell at (`row`, `col`); `None` for empty cells.
    fn value(&self, row: u32, col: u32) -> Option<String>;
}

/// Host grid re-layout API.
pub trait GridHost {
    /// Invalidate cached layout for all cells at or after `origin`.
    fn reset_after_indices(&self, origin: CellIndex);
}

/// State shared between the estimator and the coordinator.
pub(crate) struct SharedState {
    pub(crate) viewport: Viewport,
    pub(crate) mounted: bool,
}

/// Estimator and coordinator bundled over one shared viewport.
///
/// This is the Rust-facing composition; the browser widget wraps it with a
/// canvas measurer and JS callback adapters.
pub struct GridWidths<M: TextMeasurer> {
    estimator: WidthEstimator<M>,
    coordinator: ViewportCoordinator,
}

impl<M: TextMeasurer> GridWidths<M> {
    /// Build the estimator/coordinator pair from validated configuration.
    ///
    /// # Errors
    /// Configuration validation failure (see [`EstimatorConfig::validate`]).
    pub fn new(
        config: EstimatorConfig,
        measurer: M,
        values: Rc<dyn CellValues>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Rc::new(config);
        let state = Rc::new(RefCell::new(SharedState {
            viewport: Viewport::default(),
            mounted: false,
        }));
        let measurer = Rc::new(RefCell::new(CachedMeasurer::new(measurer)));
        Ok(Self {
            estimator: WidthEstimator::new(
                Rc::clone(&config),
                Rc::clone(&state),
                measurer,
                values,
            ),
            coordinator: ViewportCoordinator::new(config, state),
        })
    }

    /// Width for `column`, pluggable into the grid's column-sizing slot.
    pub fn column_width(&self, column: u32) -> f64 {
        self.estimator.column_width(column)
    }

    /// Handle a new visible region, pluggable into the grid's viewport slot.
    pub fn on_viewport_change(&mut self, now_ms: f64, next: Viewport) {
        self.coordinator.on_viewport_change(now_ms, next);
    }

    /// Fire the pending re-layout call if due. Returns true when delivered.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        self.coordinator.poll(now_ms)
    }

    /// Consume the pending call if due, returning the host handle and origin
    /// so the caller can invoke outside any shared borrow.
    pub fn take_due(&mut self, now_ms: f64) -> Option<(Rc<dyn GridHost>, CellIndex)> {
        self.coordinator.take_due(now_ms)
    }

    /// Deadline of the pending re-layout call, if any.
    pub fn deadline_ms(&self) -> Option<f64> {
        self.coordinator.deadline_ms()
    }

    /// Attach the host grid re-layout handle.
    pub fn set_host(&mut self, host: Rc<dyn GridHost>) {
        self.coordinator.set_host(host);
    }

    /// Mark the first stable layout as complete.
    pub fn mark_mounted(&mut self) {
        self.coordinator.mark_mounted();
    }

    /// Replace the measurement font.
    pub fn set_font(&self, font: &str) {
        self.estimator.set_font(font);
    }

    /// The currently cached viewport.
    pub fn viewport(&self) -> Viewport {
        self.coordinator.viewport()
    }

    /// Whether the first stable layout has completed.
    pub fn mounted(&self) -> bool {
        self.coordinator.mounted()
    }

    /// Number of cached text measurements.
    pub fn measure_cache_len(&self) -> usize {
        self.estimator.measure_cache_len()
    }
}
