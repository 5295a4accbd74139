//! Column width estimation by sampling visible rows.

use std::cell::RefCell;
use std::rc::Rc;

use super::{CellValues, SharedState};
use crate::config::EstimatorConfig;
use crate::measure::{CachedMeasurer, TextMeasurer};

/// Estimates a column's display width from sampled cell text.
///
/// A width query samples a bounded range of rows starting at the cached
/// viewport's first visible row, measures each present value, and returns the
/// widest measurement plus the spacing margin, floored at the minimum column
/// width. Deterministic given stable viewport, values and font.
pub struct WidthEstimator<M: TextMeasurer> {
    config: Rc<EstimatorConfig>,
    state: Rc<RefCell<SharedState>>,
    measurer: Rc<RefCell<CachedMeasurer<M>>>,
    values: Rc<dyn CellValues>,
}

impl<M: TextMeasurer> WidthEstimator<M> {
    pub(crate) fn new(
        config: Rc<EstimatorConfig>,
        state: Rc<RefCell<SharedState>>,
        measurer: Rc<RefCell<CachedMeasurer<M>>>,
        values: Rc<dyn CellValues>,
    ) -> Self {
        Self {
            config,
            state,
            measurer,
            values,
        }
    }

    /// Width for `column`: the widest sampled value plus the spacing margin,
    /// never below the minimum column width.
    pub fn column_width(&self, column: u32) -> f64 {
        let viewport = self.state.borrow().viewport;
        let bound = self.config.row_sample_bound(&viewport);
        let mut measurer = self.measurer.borrow_mut();

        let mut width = self.config.minimum_column_width;
        for row in viewport.row_start..bound {
            let Some(text) = self.values.value(row, column) else {
                continue;
            };
            // Surface not ready: skip the sample, same as an empty cell.
            let Some(metrics) = measurer.measure(&text) else {
                continue;
            };
            let candidate = metrics.width.ceil() + self.config.cell_spacing_margin;
            if candidate > width {
                width = candidate;
            }
        }
        width
    }

    /// Replace the measurement font; applies to all subsequent measurements.
    pub fn set_font(&self, font: &str) {
        self.measurer.borrow_mut().set_font(font);
    }

    pub(crate) fn measure_cache_len(&self) -> usize {
        self.measurer.borrow().cache_len()
    }
}
