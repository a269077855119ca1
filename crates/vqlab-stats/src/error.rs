//! Error handling for statistics.

use thiserror::Error;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur while summarizing a cost history.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatsError {
    /// The history has no entries.
    #[error("Cannot summarize an empty cost history")]
    EmptyHistory,

    /// Moving-average window is zero or longer than the data.
    #[error("Invalid moving-average window {window} for {len} data points")]
    InvalidWindow { window: usize, len: usize },

    /// Histogram requested with zero bins.
    #[error("Histogram needs at least one bin")]
    InvalidBinCount,
}
