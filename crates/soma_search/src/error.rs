//! Error types for the event search engine.

use thiserror::Error;

/// Errors from event search.
///
/// The scan itself is pure computation and cannot fail; errors only arise
/// from unusable configuration or years the calendar arithmetic cannot
/// represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Search or model configuration is structurally invalid.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(&'static str),
    /// Year is outside the representable calendar range.
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}
