//! Structured error types for gridfit.

/// All errors that can occur in gridfit configuration and measurement.
#[derive(Debug, thiserror::Error)]
pub enum GridfitError {
    /// Invalid construction-time configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Measurement surface acquisition failure.
    #[error("Measurement surface: {0}")]
    Surface(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridfitError>;

impl From<String> for GridfitError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridfitError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridfitError> for wasm_bindgen::JsValue {
    fn from(e: GridfitError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
