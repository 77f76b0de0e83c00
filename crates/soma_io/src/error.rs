//! Error types for the file layer.

use thiserror::Error;

/// Errors from reading or writing wire-format files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IoError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The outer JSON document is not an array of records.
    #[error("malformed event document: {0}")]
    Json(#[from] serde_json::Error),
    /// Year range arguments are inverted.
    #[error("end year must not precede start year")]
    InvalidYearRange,
}
