//! Error handling for report generation.

use std::path::PathBuf;

use thiserror::Error;
use vqlab_stats::StatsError;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while writing a report.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// Statistics could not be computed (empty history, bad window).
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Filesystem error.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plot rendering or encoding failed.
    #[error("Failed to render {}: {message}", .path.display())]
    Plot { path: PathBuf, message: String },

    /// HTML to PDF conversion failed.
    #[error("PDF conversion with '{command}' failed: {message}")]
    PdfConversion { command: String, message: String },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn plot(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ReportError::Plot {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
