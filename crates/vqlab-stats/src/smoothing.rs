//! Moving averages.

use crate::error::{StatsError, StatsResult};

/// Box-window moving average over the positions where the window fits
/// entirely inside `data`.
///
/// Returns `data.len() - window + 1` values.
pub fn moving_average(data: &[f64], window: usize) -> StatsResult<Vec<f64>> {
    if window == 0 || window > data.len() {
        return Err(StatsError::InvalidWindow {
            window,
            len: data.len(),
        });
    }

    let w = window as f64;
    let mut sum: f64 = data[..window].iter().sum();
    let mut out = Vec::with_capacity(data.len() - window + 1);
    out.push(sum / w);
    for i in window..data.len() {
        sum += data[i] - data[i - window];
        out.push(sum / w);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_three() {
        let avg = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(avg.len(), 3);
        assert_relative_eq!(avg[0], 2.0);
        assert_relative_eq!(avg[1], 3.0);
        assert_relative_eq!(avg[2], 4.0);
    }

    #[test]
    fn test_window_equal_to_len() {
        let avg = moving_average(&[2.0, 4.0], 2).unwrap();
        assert_eq!(avg, vec![3.0]);
    }

    #[test]
    fn test_invalid_windows() {
        assert_eq!(
            moving_average(&[1.0; 5], 10),
            Err(StatsError::InvalidWindow { window: 10, len: 5 })
        );
        assert!(moving_average(&[1.0; 5], 0).is_err());
        assert!(moving_average(&[], 1).is_err());
    }
}
