//! Grid-region types shared by the estimator and the coordinator.

mod viewport;

pub use viewport::{CellIndex, Viewport};
