//! Construction-time options for the estimator and the coordinator.
//!
//! All options are optional with defaults; the external (JS-facing) names are
//! the camelCase serde names. Configuration is immutable once a widget is
//! built; only the measurement font can change afterwards, through the
//! measurer.

use serde::{Deserialize, Serialize};

use crate::error::{GridfitError, Result};
use crate::layout::Viewport;

/// Default measurement font, matching the canvas default used for cells.
pub const DEFAULT_MEASUREMENT_FONT: &str = "12px sans-serif";

/// Row sampling strategy for width estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeStrategy {
    /// Estimate from the rows seen so far (viewport plus an initial sample).
    Lazy,
    /// Estimate from the entire data set once, up front.
    Full,
}

/// Options accepted at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimatorConfig {
    /// Number of rows sampled before the first viewport arrives; also the
    /// floor of the lazy sampling bound.
    pub initial_visible_row_sample_count: u32,
    /// Lower bound for every estimated width, in CSS pixels.
    pub minimum_column_width: f64,
    /// Horizontal padding added to the widest measured value.
    pub cell_spacing_margin: f64,
    /// Quiet period before a re-layout call fires.
    pub debounce_delay_ms: u32,
    /// Row sampling strategy.
    pub resize_strategy: ResizeStrategy,
    /// Whether scroll-driven viewport changes may trigger recalculation.
    pub recalculate_on_scroll: bool,
    /// Font specification applied to the measurement surface at construction.
    pub measurement_font: String,
    /// Total number of rows in the data set; required for [`ResizeStrategy::Full`].
    pub total_row_count: Option<u32>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            initial_visible_row_sample_count: 20,
            minimum_column_width: 60.0,
            cell_spacing_margin: 10.0,
            debounce_delay_ms: 300,
            resize_strategy: ResizeStrategy::Lazy,
            recalculate_on_scroll: true,
            measurement_font: DEFAULT_MEASUREMENT_FONT.to_string(),
            total_row_count: None,
        }
    }
}

impl EstimatorConfig {
    /// Check construction-time invariants.
    ///
    /// # Errors
    /// `full` strategy without `totalRowCount`: the whole data set cannot be
    /// sampled without knowing its size, and silently falling back to lazy
    /// would change semantics.
    pub fn validate(&self) -> Result<()> {
        if self.resize_strategy == ResizeStrategy::Full && self.total_row_count.is_none() {
            return Err(GridfitError::Config(
                "resizeStrategy \"full\" requires totalRowCount".to_string(),
            ));
        }
        Ok(())
    }

    /// Exclusive row bound for sampling under the current viewport.
    pub fn row_sample_bound(&self, viewport: &Viewport) -> u32 {
        match self.resize_strategy {
            ResizeStrategy::Full => self.total_row_count.unwrap_or(0),
            ResizeStrategy::Lazy => viewport
                .row_stop
                .max(self.initial_visible_row_sample_count),
        }
    }
}
