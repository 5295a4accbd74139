//! gridfit - content-aware column widths for virtualized grids
//!
//! Estimates per-column display widths for a virtualized, scrollable grid by
//! sampling visible cell text and measuring it via Canvas 2D:
//! - Bounded row sampling (lazy) or whole-data-set estimation (full)
//! - Font+text keyed measurement caching
//! - Debounced re-layout triggering on viewport changes
//! - Pluggable measurement and host-grid seams, testable off-browser
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridFit } from 'gridfit';
//! await init();
//! const fit = new GridFit(canvas, { minimumColumnWidth: 80 });
//! fit.set_value_callback((row, col) => data[row]?.[col] ?? null);
//! fit.set_relayout_callback((row, col) =>
//!   grid.resetAfterIndices({ rowIndex: row, columnIndex: col }));
//! grid.columnWidth = (col) => fit.column_width(col);
//! ```

// Core modules (target independent)
pub mod config;
pub mod error;
pub mod layout;
pub mod measure;
pub mod sizer;

// Browser bindings (Canvas 2D measurement, timers)
pub mod widget;

use wasm_bindgen::prelude::*;

// Re-export the main widget struct
pub use widget::GridFit;

pub use config::{EstimatorConfig, ResizeStrategy};
pub use error::{GridfitError, Result};
pub use layout::{CellIndex, Viewport};
pub use sizer::{CellValues, GridHost, GridWidths};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
