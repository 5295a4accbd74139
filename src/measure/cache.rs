//! Width cache for text measurements.
//!
//! Keyed on the active font and the measured string (`"font\ntext"`), with
//! insertion-order eviction at a fixed cap. Lookups do not promote entries.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Default capacity of the measurement cache.
pub const MEASURE_CACHE_CAP: usize = 4096;

/// A capped width cache keyed on font and text.
pub struct MeasureCache {
    entries: HashMap<Rc<str>, f64>,
    order: VecDeque<Rc<str>>,
    capacity: usize,
    scratch: String,
}

impl MeasureCache {
    /// Create a cache holding at most `capacity` widths.
    ///
    /// A capacity of 0 disables caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            scratch: String::new(),
        }
    }

    /// Look up a cached width. Returns `None` if not present or capacity is 0.
    pub fn get(&mut self, font: &str, text: &str) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        let key = Self::compose_key(&mut self.scratch, font, text);
        self.entries.get(key).copied()
    }

    /// Insert a measured width. Existing entries are not updated.
    pub fn insert(&mut self, font: &str, text: &str, width: f64) {
        if self.capacity == 0 {
            return;
        }
        let key = Self::compose_key(&mut self.scratch, font, text);
        if self.entries.contains_key(key) {
            return;
        }
        let key: Rc<str> = key.into();
        self.entries.insert(Rc::clone(&key), width);
        self.order.push_back(key);
        self.evict_over_cap();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn compose_key<'a>(scratch: &'a mut String, font: &str, text: &str) -> &'a str {
        scratch.clear();
        scratch.reserve(font.len() + 1 + text.len());
        scratch.push_str(font);
        scratch.push('\n');
        scratch.push_str(text);
        scratch.as_str()
    }

    /// Evict oldest entries until at or below capacity.
    fn evict_over_cap(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}
