//! Text measurement abstraction and caching.
//!
//! The estimator never talks to a rendering surface directly: it goes through
//! [`TextMeasurer`], with [`CachedMeasurer`] layering a font+text keyed width
//! cache on top. The Canvas 2D adapter lives in [`canvas`] (wasm32 only).

mod cache;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use cache::{MeasureCache, MEASURE_CACHE_CAP};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasMeasurer;

/// Measured extent of a rendered string under the active font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width in CSS pixels.
    pub width: f64,
}

/// A host-provided text measurement surface.
///
/// Implementations keep one piece of mutable state, the active font. It is
/// applied immediately by [`set_font`](TextMeasurer::set_font) and used by
/// all subsequent measurements until changed; results obtained under a
/// previous font must not be reused.
pub trait TextMeasurer {
    /// Replace the active font specification.
    fn set_font(&mut self, font: &str);

    /// The active font specification.
    fn font(&self) -> &str;

    /// Measure `text` under the active font.
    ///
    /// `None` means the surface is unavailable; callers skip the sample the
    /// same way they skip an empty cell.
    fn measure(&mut self, text: &str) -> Option<TextMetrics>;
}

/// Wraps a measurer with a width cache keyed on font and text.
///
/// The font participates in the key, so a font change needs no explicit
/// invalidation: measurements under the old font simply stop matching.
/// Failed (`None`) measurements are not cached.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: MeasureCache,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    /// Wrap `inner` with the default cache capacity.
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, MEASURE_CACHE_CAP)
    }

    /// Wrap `inner` with an explicit cache capacity (0 disables caching).
    pub fn with_capacity(inner: M, capacity: usize) -> Self {
        Self {
            inner,
            cache: MeasureCache::new(capacity),
        }
    }

    /// Number of cached widths.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached widths.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn set_font(&mut self, font: &str) {
        self.inner.set_font(font);
    }

    fn font(&self) -> &str {
        self.inner.font()
    }

    fn measure(&mut self, text: &str) -> Option<TextMetrics> {
        if let Some(width) = self.cache.get(self.inner.font(), text) {
            return Some(TextMetrics { width });
        }
        let metrics = self.inner.measure(text)?;
        self.cache.insert(self.inner.font(), text, metrics.width);
        Some(metrics)
    }
}
