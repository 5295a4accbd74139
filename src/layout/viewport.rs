//! Visible-region state delivered by the host grid.

use serde::{Deserialize, Serialize};

/// The currently visible cell rectangle, in row/column indices.
///
/// Replaced wholesale on every host notification. Stop indices are expected
/// to be at or past their start index on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// First visible row index
    #[serde(rename = "rowStartIndex")]
    pub row_start: u32,
    /// Last visible row boundary (>= `row_start`)
    #[serde(rename = "rowStopIndex")]
    pub row_stop: u32,
    /// First visible column index
    #[serde(rename = "columnStartIndex")]
    pub col_start: u32,
    /// Last visible column boundary (>= `col_start`)
    #[serde(rename = "columnStopIndex")]
    pub col_stop: u32,
}

impl Viewport {
    /// Create a viewport covering the given row/column ranges.
    pub fn new(row_start: u32, row_stop: u32, col_start: u32, col_stop: u32) -> Self {
        Self {
            row_start,
            row_stop,
            col_start,
            col_stop,
        }
    }

    /// Top-left visible cell, used as the re-layout invalidation origin.
    pub fn origin(&self) -> CellIndex {
        CellIndex {
            row: self.row_start,
            col: self.col_start,
        }
    }

    /// True when both start indices match `other`.
    ///
    /// Stop-only changes are not scroll boundary crossings: a sub-row pixel
    /// scroll or a resize that exposes more cells keeps both origins.
    pub fn same_origin(&self, other: &Viewport) -> bool {
        self.row_start == other.row_start && self.col_start == other.col_start
    }
}

/// A single cell position (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellIndex {
    /// Row index (0-based)
    #[serde(rename = "rowIndex")]
    pub row: u32,
    /// Column index (0-based)
    #[serde(rename = "columnIndex")]
    pub col: u32,
}
