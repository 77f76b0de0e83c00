//! Calibration optimizer for the phase model.
//!
//! Fits the two free model parameters (reference new-moon instant, synodic
//! month length) by exhaustive grid search: every candidate pair runs the
//! event search over the calibration years and is scored by mean absolute
//! timing error against reference full-moon instants. The grid is scanned in
//! parallel; the reduction keeps the deterministic first-in-grid-order
//! winner on ties and supports cooperative cancellation.

pub mod error;
pub mod grid;
pub mod grid_types;

pub use error::CalibrationError;
pub use grid::{calibrate, calibrate_with_cancel};
pub use grid_types::{CalibrationConfig, CalibrationResult, ReferenceDataset};
