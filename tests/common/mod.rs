//! Shared test doubles for the estimator and coordinator tests.
//!
//! - `FakeMeasurer`: scripted text widths with call counting and a
//!   surface-availability switch
//! - `TableValues`: in-memory cell values
//! - `RecordingHost`: records re-layout invalidation origins
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gridfit::measure::{TextMeasurer, TextMetrics};
use gridfit::{CellIndex, CellValues, EstimatorConfig, GridHost, GridWidths, Viewport};

/// Measurer with scripted per-string widths.
///
/// Unknown strings measure at 6px per char; per-font scale factors make font
/// changes observable. The call counter and availability switch are shared
/// handles so tests keep access after the measurer moves into the widget.
pub struct FakeMeasurer {
    font: String,
    widths: HashMap<String, f64>,
    scales: HashMap<String, f64>,
    calls: Rc<Cell<u32>>,
    available: Rc<Cell<bool>>,
    per_char: f64,
}

impl FakeMeasurer {
    pub fn new() -> Self {
        Self {
            font: "12px sans-serif".to_string(),
            widths: HashMap::new(),
            scales: HashMap::new(),
            calls: Rc::new(Cell::new(0)),
            available: Rc::new(Cell::new(true)),
            per_char: 6.0,
        }
    }

    /// Scripted widths for specific strings.
    pub fn with_widths(pairs: &[(&str, f64)]) -> Self {
        let mut measurer = Self::new();
        for (text, width) in pairs {
            measurer.widths.insert((*text).to_string(), *width);
        }
        measurer
    }

    /// Multiply all widths by `scale` while `font` is active.
    pub fn scaled(mut self, font: &str, scale: f64) -> Self {
        self.scales.insert(font.to_string(), scale);
        self
    }

    /// Shared handle to the number of underlying measurement calls.
    pub fn calls_handle(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.calls)
    }

    /// Shared handle to the surface-availability switch.
    pub fn availability_handle(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.available)
    }
}

impl TextMeasurer for FakeMeasurer {
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn font(&self) -> &str {
        &self.font
    }

    fn measure(&mut self, text: &str) -> Option<TextMetrics> {
        if !self.available.get() {
            return None;
        }
        self.calls.set(self.calls.get() + 1);
        let scale = self.scales.get(&self.font).copied().unwrap_or(1.0);
        let base = self
            .widths
            .get(text)
            .copied()
            .unwrap_or_else(|| self.per_char * text.chars().count() as f64);
        Some(TextMetrics {
            width: base * scale,
        })
    }
}

/// In-memory cell values, row major.
pub struct TableValues {
    rows: Vec<Vec<Option<String>>>,
}

impl TableValues {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// A single-column table from the given values.
    pub fn single_column(values: &[Option<&str>]) -> Self {
        Self {
            rows: values
                .iter()
                .map(|value| vec![value.map(str::to_string)])
                .collect(),
        }
    }

    /// An empty table: every cell reads as `None`.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }
}

impl CellValues for TableValues {
    fn value(&self, row: u32, col: u32) -> Option<String> {
        self.rows.get(row as usize)?.get(col as usize)?.clone()
    }
}

/// Host stub recording re-layout invalidation origins.
#[derive(Default)]
pub struct RecordingHost {
    calls: RefCell<Vec<CellIndex>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<CellIndex> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl GridHost for RecordingHost {
    fn reset_after_indices(&self, origin: CellIndex) {
        self.calls.borrow_mut().push(origin);
    }
}

pub fn vp(row_start: u32, row_stop: u32, col_start: u32, col_stop: u32) -> Viewport {
    Viewport::new(row_start, row_stop, col_start, col_stop)
}

/// Build a widget pair from parts, panicking on invalid configuration.
pub fn build(
    config: EstimatorConfig,
    measurer: FakeMeasurer,
    values: TableValues,
) -> GridWidths<FakeMeasurer> {
    GridWidths::new(config, measurer, Rc::new(values)).expect("valid test configuration")
}
