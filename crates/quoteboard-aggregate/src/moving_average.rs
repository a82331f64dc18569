//! Trailing simple moving average.

use std::collections::VecDeque;

use crate::AggregateError;

/// Window size used by the dashboard's overlay.
pub const DEFAULT_PERIOD: usize = 5;

/// Streaming trailing simple moving average.
///
/// Emits `None` until `period` values have been seen, then the arithmetic
/// mean of the last `period` values. The window is summed oldest first on
/// every step rather than kept as a running total, so each output is exactly
/// `sum(window) / period` with no accumulated drift.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    period: usize,
    window: VecDeque<f64>,
}

impl MovingAverage {
    /// Creates a moving average over `period` values.
    ///
    /// # Errors
    ///
    /// Returns an error if `period` is zero.
    pub fn new(period: usize) -> Result<Self, AggregateError> {
        if period == 0 {
            return Err(AggregateError::ZeroPeriod);
        }
        Ok(Self {
            period,
            window: VecDeque::with_capacity(period),
        })
    }

    /// Returns the window size.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Processes the next close, returning the average once the window is full.
    pub fn process(&mut self, close: f64) -> Option<f64> {
        if self.window.len() == self.period {
            self.window.pop_front();
        }
        self.window.push_back(close);

        if self.window.len() < self.period {
            return None;
        }

        let sum: f64 = self.window.iter().sum();
        Some(sum / self.period as f64)
    }

    /// Clears the window.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

/// Computes the moving-average overlay for a slice of closes.
///
/// The result has one entry per close: `None` for indices before
/// `period - 1`, and the trailing mean from there on. If there are fewer
/// closes than `period`, every entry is `None`.
///
/// # Errors
///
/// Returns an error if `period` is zero.
pub fn simple_moving_average(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, AggregateError> {
    let mut ma = MovingAverage::new(period)?;
    Ok(closes.iter().map(|&close| ma.process(close)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlay_alignment() {
        let closes = [10.0, 12.0, 11.0, 13.0, 14.0, 15.0];
        let ma = simple_moving_average(&closes, DEFAULT_PERIOD).unwrap();

        assert_eq!(ma.len(), closes.len());
        assert!(ma[..4].iter().all(Option::is_none));
        assert_relative_eq!(ma[4].unwrap(), 12.0);
        assert_relative_eq!(ma[5].unwrap(), 13.0);
    }

    #[test]
    fn test_short_series_is_all_undefined() {
        let ma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0], 5).unwrap();
        assert_eq!(ma, vec![None; 4]);

        assert!(simple_moving_average(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_every_defined_point_is_trailing_mean() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i % 7) * 1.25).collect();
        let period = 5;
        let ma = simple_moving_average(&closes, period).unwrap();

        for (i, value) in ma.iter().enumerate() {
            if i + 1 < period {
                assert!(value.is_none(), "index {i} should be undefined");
            } else {
                let window = &closes[i + 1 - period..=i];
                let expected = window.iter().sum::<f64>() / period as f64;
                assert_eq!(value.unwrap(), expected, "index {i}");
            }
        }
    }

    #[test]
    fn test_period_one_is_identity() {
        let closes = [3.5, 4.25, 1.0];
        let ma = simple_moving_average(&closes, 1).unwrap();
        assert_eq!(ma, vec![Some(3.5), Some(4.25), Some(1.0)]);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            simple_moving_average(&[1.0], 0).unwrap_err(),
            AggregateError::ZeroPeriod
        );
    }

    #[test]
    fn test_streaming_reset() {
        let mut ma = MovingAverage::new(2).unwrap();
        assert_eq!(ma.process(1.0), None);
        assert_eq!(ma.process(3.0), Some(2.0));
        ma.reset();
        assert_eq!(ma.process(5.0), None);
        assert_eq!(ma.period(), 2);
    }
}
