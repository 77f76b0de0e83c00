//! Error types for calibration.

use soma_search::SearchError;
use thiserror::Error;

/// Errors from the calibration grid search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CalibrationError {
    /// Grid or search configuration is structurally invalid.
    #[error("invalid calibration configuration: {0}")]
    InvalidConfig(&'static str),
    /// No candidate had a single comparable reference year, so no best
    /// parameter pair exists. Surfaced explicitly instead of defaults.
    #[error("no candidate had any comparable reference year")]
    NoComparableYears,
    /// The event search failed for a candidate model.
    #[error(transparent)]
    Search(#[from] SearchError),
}
