//! Canvas 2D measurement adapter.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{TextMeasurer, TextMetrics};
use crate::error::{GridfitError, Result};

/// Measures text through a `CanvasRenderingContext2d`.
///
/// The context's font state is owned here: the widget never sets fonts on the
/// context behind the measurer's back.
pub struct CanvasMeasurer {
    ctx: CanvasRenderingContext2d,
    font: String,
}

impl CanvasMeasurer {
    /// Create a measurer from a canvas element, applying `font` immediately.
    ///
    /// # Errors
    /// Fails when the canvas cannot provide a 2d context.
    pub fn new(canvas: &HtmlCanvasElement, font: &str) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridfitError::Surface("Failed to get 2d context".to_string()))?
            .ok_or_else(|| GridfitError::Surface("No 2d context available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| {
                GridfitError::Surface("Failed to cast to CanvasRenderingContext2d".to_string())
            })?;
        ctx.set_font(font);
        Ok(Self {
            ctx,
            font: font.to_string(),
        })
    }
}

impl TextMeasurer for CanvasMeasurer {
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
        self.ctx.set_font(font);
    }

    fn font(&self) -> &str {
        &self.font
    }

    fn measure(&mut self, text: &str) -> Option<TextMetrics> {
        self.ctx
            .measure_text(text)
            .ok()
            .map(|metrics| TextMetrics {
                width: metrics.width(),
            })
    }
}
