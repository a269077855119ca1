//! Distribution summaries used for plotting: histogram, box plot and
//! kernel density estimate.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::statistics::{percentile_sorted, sorted};

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    /// Count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `data` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. When every value is equal the
    /// range is widened to `[v − 0.5, v + 0.5]`.
    pub fn new(data: &[f64], bins: usize) -> StatsResult<Self> {
        if bins == 0 {
            return Err(StatsError::InvalidBinCount);
        }
        if data.is_empty() {
            return Err(StatsError::EmptyHistory);
        }

        let (mut lo, mut hi) = min_max(data);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for &x in data {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Largest bin count.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left, right, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| (e[0], e[1], c))
    }
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value at or above `q1 − 1.5·IQR`.
    pub lower_whisker: f64,
    /// Largest value at or below `q3 + 1.5·IQR`.
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarize non-empty `data`.
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        if data.is_empty() {
            return Err(StatsError::EmptyHistory);
        }
        let sorted = sorted(data);
        let q1 = percentile_sorted(&sorted, 25.0);
        let median = percentile_sorted(&sorted, 50.0);
        let q3 = percentile_sorted(&sorted, 75.0);
        let fence = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);

        let inside = |x: &&f64| (lo_fence..=hi_fence).contains(*x);
        let lower_whisker = sorted.iter().find(inside).copied().unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().find(inside).copied().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|x| *x < lo_fence || *x > hi_fence)
            .collect();

        Ok(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Gaussian kernel density estimate with Scott's bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit to `data`. Returns `None` when there are fewer than two points or
    /// the sample variance is zero, since no bandwidth exists.
    pub fn new(data: &[f64]) -> Option<Self> {
        if data.len() < 2 {
            return None;
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let sample_var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let bandwidth = n.powf(-0.2) * sample_var.sqrt();
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        Some(Self {
            data: data.to_vec(),
            bandwidth,
        })
    }

    /// Kernel bandwidth.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let n = self.data.len() as f64;
        let norm = 1.0 / (n * self.bandwidth * (2.0 * std::f64::consts::PI).sqrt());
        norm * self
            .data
            .iter()
            .map(|xi| {
                let u = (x - xi) / self.bandwidth;
                (-0.5 * u * u).exp()
            })
            .sum::<f64>()
    }

    /// `points` evenly spaced `(x, density)` samples from three bandwidths
    /// below the data minimum to three above the maximum.
    pub fn curve(&self, points: usize) -> Vec<(f64, f64)> {
        let (lo, hi) = min_max(&self.data);
        let start = lo - 3.0 * self.bandwidth;
        let end = hi + 3.0 * self.bandwidth;
        let step = if points > 1 {
            (end - start) / (points - 1) as f64
        } else {
            0.0
        };
        (0..points)
            .map(|i| {
                let x = start + step * i as f64;
                (x, self.density(x))
            })
            .collect()
    }
}

fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}
