//! Run-level metrics.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::statistics::Statistics;

/// Aggregate metrics of one cost history.
///
/// `mean_absolute_error` and `mean_squared_error` keep their conventional
/// names, but there is no reference signal: they are `mean(|x|)` and
/// `mean(x²)` of the cost values themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mean_absolute_error: f64,
    pub mean_squared_error: f64,
    /// Last entry of the history.
    pub final_cost: f64,
    pub statistics: Statistics,
}

impl Metrics {
    /// Compute metrics for a non-empty `history`.
    pub fn from_history(history: &[f64]) -> StatsResult<Self> {
        let Some(&final_cost) = history.last() else {
            return Err(StatsError::EmptyHistory);
        };
        let n = history.len() as f64;

        Ok(Self {
            mean_absolute_error: history.iter().map(|x| x.abs()).sum::<f64>() / n,
            mean_squared_error: history.iter().map(|x| x * x).sum::<f64>() / n,
            final_cost,
            statistics: Statistics::from_history(history)?,
        })
    }
}
