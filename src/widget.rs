//! Browser-facing widget bindings.
//!
//! [`GridFit`] is the `wasm-bindgen` export: it owns the Canvas 2D
//! measurement surface, adapts JS callbacks to the [`CellValues`] and
//! [`GridHost`] seams, and drives the debounce deadline with a
//! cancel-and-reschedule timeout.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use serde::Serialize;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlCanvasElement;

#[cfg(target_arch = "wasm32")]
use crate::config::EstimatorConfig;
#[cfg(target_arch = "wasm32")]
use crate::layout::{CellIndex, Viewport};
#[cfg(target_arch = "wasm32")]
use crate::measure::CanvasMeasurer;
#[cfg(target_arch = "wasm32")]
use crate::sizer::{CellValues, GridHost, GridWidths};

// Timing helper for debounce deadlines.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Cell value accessor backed by a late-bound JS callback
/// `(row, col) => string | null`.
#[cfg(target_arch = "wasm32")]
struct JsCellValues {
    callback: RefCell<Option<Function>>,
}

#[cfg(target_arch = "wasm32")]
impl CellValues for JsCellValues {
    fn value(&self, row: u32, col: u32) -> Option<String> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        let value = callback
            .call2(&JsValue::NULL, &JsValue::from(row), &JsValue::from(col))
            .ok()?;
        if value.is_null() || value.is_undefined() {
            return None;
        }
        value
            .as_string()
            .or_else(|| value.as_f64().map(|n| n.to_string()))
    }
}

/// Host re-layout API backed by a JS callback `(rowIndex, columnIndex) => void`.
#[cfg(target_arch = "wasm32")]
struct JsGridHost {
    callback: Function,
}

#[cfg(target_arch = "wasm32")]
impl GridHost for JsGridHost {
    fn reset_after_indices(&self, origin: CellIndex) {
        // Failures inside the deferred call are not retried.
        let _ = self.callback.call2(
            &JsValue::NULL,
            &JsValue::from(origin.row),
            &JsValue::from(origin.col),
        );
    }
}

/// Widget state shared with the flush-timer callback (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct WidgetState {
    core: GridWidths<CanvasMeasurer>,
    values: Rc<JsCellValues>,
    flush_timer: Option<i32>,
    flush_closure: Option<Closure<dyn FnMut()>>,
}

/// Debug snapshot of the estimator state.
#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
struct WidthMetrics {
    viewport: Viewport,
    mounted: bool,
    pending_deadline_ms: Option<f64>,
    cached_measurements: usize,
}

/// The estimator widget exported to JavaScript
#[wasm_bindgen]
pub struct GridFit {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<WidgetState>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridFit {
    /// Create an estimator measuring through `canvas`.
    ///
    /// `options` is a plain object carrying the construction-time options
    /// under their camelCase names; pass `undefined` for all defaults.
    ///
    /// # Errors
    /// Fails when the canvas cannot provide a 2d context or the options are
    /// invalid (e.g. `resizeStrategy: "full"` without `totalRowCount`).
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: &HtmlCanvasElement, options: JsValue) -> Result<GridFit, JsValue> {
        console_error_panic_hook::set_once();

        let config: EstimatorConfig = if options.is_undefined() || options.is_null() {
            EstimatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?
        };

        let measurer = CanvasMeasurer::new(canvas, &config.measurement_font)?;
        let values = Rc::new(JsCellValues {
            callback: RefCell::new(None),
        });
        let core = GridWidths::new(config, measurer, Rc::clone(&values) as Rc<dyn CellValues>)?;

        Ok(GridFit {
            state: Rc::new(RefCell::new(WidgetState {
                core,
                values,
                flush_timer: None,
                flush_closure: None,
            })),
        })
    }

    /// Set the cell value accessor: `(row, col) => string | null`.
    ///
    /// Until set, every cell reads as empty and widths stay at the minimum.
    pub fn set_value_callback(&self, callback: Function) {
        let state = self.state.borrow();
        *state.values.callback.borrow_mut() = Some(callback);
    }

    /// Set the host re-layout callback: `(rowIndex, columnIndex) => void`.
    pub fn set_relayout_callback(&self, callback: Function) {
        self.state
            .borrow_mut()
            .core
            .set_host(Rc::new(JsGridHost { callback }));
    }

    /// Width for `column` in CSS pixels, pluggable into the grid's
    /// column-sizing slot.
    pub fn column_width(&self, column: u32) -> f64 {
        self.state.borrow().core.column_width(column)
    }

    /// Notify a new visible region, pluggable into the grid's viewport slot.
    pub fn on_viewport_change(&self, row_start: u32, row_stop: u32, col_start: u32, col_stop: u32) {
        {
            let mut state = self.state.borrow_mut();
            state.core.on_viewport_change(
                now_ms(),
                Viewport::new(row_start, row_stop, col_start, col_stop),
            );
        }
        Self::schedule_flush_timeout(&self.state);
    }

    /// Mark the first stable layout as complete; qualifying viewport changes
    /// trigger recalculation from here on.
    pub fn mark_mounted(&self) {
        self.state.borrow_mut().core.mark_mounted();
    }

    /// Replace the measurement font, applied to all subsequent measurements.
    pub fn set_font(&self, font: &str) {
        self.state.borrow().core.set_font(font);
    }

    /// Debug snapshot of the estimator state.
    ///
    /// # Errors
    /// Serialization failure crossing into JS.
    pub fn metrics(&self) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let metrics = WidthMetrics {
            viewport: state.core.viewport(),
            mounted: state.core.mounted(),
            pending_deadline_ms: state.core.deadline_ms(),
            cached_measurements: state.core.measure_cache_len(),
        };
        serde_wasm_bindgen::to_value(&metrics)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    fn schedule_flush_timeout(state: &Rc<RefCell<WidgetState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        // Cancel any existing timer
        if let Some(timer_id) = s.flush_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        let Some(deadline) = s.core.deadline_ms() else {
            return;
        };
        if s.flush_closure.is_none() {
            let weak: Weak<RefCell<WidgetState>> = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    GridFit::handle_flush(&state);
                }
            }) as Box<dyn FnMut()>);
            s.flush_closure = Some(closure);
        }
        let Some(callback) = s.flush_closure.as_ref() else {
            return;
        };
        #[allow(clippy::cast_possible_truncation)]
        let remaining = (deadline - now_ms()).max(0.0).ceil() as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            remaining,
        ) {
            Ok(id) => s.flush_timer = Some(id),
            Err(_) => s.flush_timer = None,
        }
    }

    fn handle_flush(state: &Rc<RefCell<WidgetState>>) {
        let now = now_ms();
        // Collect the due call inside the borrow, invoke it outside: the host
        // callback may synchronously query widths on this same widget.
        let (due, still_pending) = {
            let mut s = state.borrow_mut();
            s.flush_timer = None;
            let due = s.core.take_due(now);
            (due, s.core.deadline_ms().is_some())
        };
        if let Some((host, origin)) = due {
            host.reset_after_indices(origin);
        }
        if still_pending {
            // Superseded while waiting: re-arm for the remaining quiet period.
            Self::schedule_flush_timeout(state);
        }
    }
}
