//! vqlab statistics
//!
//! Summaries of an optimizer's cost history: descriptive statistics,
//! run-level metrics, moving averages and the distribution summaries the
//! reporter plots.

pub mod distribution;
pub mod error;
pub mod metrics;
pub mod smoothing;
pub mod statistics;

pub use distribution::{BoxSummary, GaussianKde, Histogram};
pub use error::{StatsError, StatsResult};
pub use metrics::Metrics;
pub use smoothing::moving_average;
pub use statistics::{Statistics, percentile};
