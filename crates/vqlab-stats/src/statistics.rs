//! Descriptive statistics of a cost history.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Summary of a non-empty sample.
///
/// Standard deviation and variance are population quantities (divide by
/// `n`). Percentiles interpolate linearly between the closest ranks, with
/// rank `q/100 · (n − 1)` into the sorted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    /// `p75 − p25`.
    pub iqr: f64,
    /// `std_dev / mean`, or `+∞` when the mean is exactly zero.
    pub coefficient_of_variation: f64,
}

impl Statistics {
    /// Summarize `history`.
    pub fn from_history(history: &[f64]) -> StatsResult<Self> {
        if history.is_empty() {
            return Err(StatsError::EmptyHistory);
        }

        let sorted = sorted(history);
        let n = history.len() as f64;
        let mean = history.iter().sum::<f64>() / n;
        let variance = history.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let p25 = percentile_sorted(&sorted, 25.0);
        let p75 = percentile_sorted(&sorted, 75.0);

        let coefficient_of_variation = if mean == 0.0 {
            f64::INFINITY
        } else {
            std_dev / mean
        };

        Ok(Self {
            mean,
            median: percentile_sorted(&sorted, 50.0),
            std_dev,
            variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p10: percentile_sorted(&sorted, 10.0),
            p25,
            p75,
            p90: percentile_sorted(&sorted, 90.0),
            iqr: p75 - p25,
            coefficient_of_variation,
        })
    }

    /// Labelled rows in display order.
    pub fn entries(&self) -> [(&'static str, f64); 12] {
        [
            ("Mean", self.mean),
            ("Median", self.median),
            ("Standard Deviation", self.std_dev),
            ("Variance", self.variance),
            ("Minimum", self.min),
            ("Maximum", self.max),
            ("10th Percentile", self.p10),
            ("25th Percentile", self.p25),
            ("75th Percentile", self.p75),
            ("90th Percentile", self.p90),
            ("Interquartile Range", self.iqr),
            ("Coefficient of Variation", self.coefficient_of_variation),
        ]
    }
}

/// Percentile `q` (0–100) of unsorted `data`.
pub fn percentile(data: &[f64], q: f64) -> StatsResult<f64> {
    if data.is_empty() {
        return Err(StatsError::EmptyHistory);
    }
    Ok(percentile_sorted(&sorted(data), q))
}

pub(crate) fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linear-interpolation percentile of already sorted, non-empty data.
pub(crate) fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
