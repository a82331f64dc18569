//! Display-ready chart series with moving-average overlay.

use quoteboard_types::{Series, Symbol};
use serde::{Deserialize, Serialize};

use crate::{AggregateError, DEFAULT_PERIOD, MovingAverage, OhlcPolicy};

/// One chart row: a day's OHLC, volume and overlay value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    /// Date label copied from the observation.
    pub date: String,
    /// Opening price (reported or synthetic).
    pub open: f64,
    /// High (reported or synthetic).
    pub high: f64,
    /// Low (reported or synthetic).
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Moving-average overlay; `None` until the window fills.
    pub ma: Option<f64>,
}

impl ChartBar {
    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Chart rows for one symbol, aligned index-for-index with its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Symbol the rows belong to.
    pub symbol: Symbol,
    /// Moving-average window used for the overlay.
    pub period: usize,
    /// OHLC policy used for open/high/low.
    pub policy: OhlcPolicy,
    /// Chart rows, most-recent-last.
    pub bars: Vec<ChartBar>,
}

impl ChartSeries {
    /// Returns the overlay values in order.
    #[must_use]
    pub fn moving_average(&self) -> Vec<Option<f64>> {
        self.bars.iter().map(|b| b.ma).collect()
    }

    /// Returns the most recent defined overlay value.
    #[must_use]
    pub fn latest_ma(&self) -> Option<f64> {
        self.bars.iter().rev().find_map(|b| b.ma)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Builds [`ChartSeries`] from a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBuilder {
    period: usize,
    policy: OhlcPolicy,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            policy: OhlcPolicy::default(),
        }
    }
}

impl ChartBuilder {
    /// Creates a builder with the default period and synthetic OHLC.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the moving-average window.
    #[must_use]
    pub const fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the OHLC policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: OhlcPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the moving-average window.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Returns the OHLC policy.
    #[must_use]
    pub const fn policy(&self) -> OhlcPolicy {
        self.policy
    }

    /// Builds the chart rows for a series.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured period is zero.
    pub fn build(&self, series: &Series) -> Result<ChartSeries, AggregateError> {
        let mut ma = MovingAverage::new(self.period)?;
        let mut previous_close = None;

        let bars = series
            .observations()
            .iter()
            .map(|obs| {
                let (open, high, low) = self.policy.derive(previous_close, obs);
                previous_close = Some(obs.close);
                ChartBar {
                    date: obs.date.clone(),
                    open,
                    high,
                    low,
                    close: obs.close,
                    volume: obs.volume,
                    ma: ma.process(obs.close),
                }
            })
            .collect();

        Ok(ChartSeries {
            symbol: series.symbol().clone(),
            period: self.period,
            policy: self.policy,
            bars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quoteboard_types::Observation;

    fn series(closes: &[f64]) -> Series {
        let observations = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Observation::new(format!("d{i}"), c, 100 + i as u64))
            .collect();
        Series::new(Symbol::new("KTOS").unwrap(), observations)
    }

    #[test]
    fn test_build_end_to_end() {
        let chart = ChartBuilder::new()
            .build(&series(&[10.0, 12.0, 11.0, 13.0, 14.0, 15.0]))
            .unwrap();

        assert_eq!(chart.len(), 6);
        assert_eq!(chart.period, 5);
        assert_eq!(chart.bars[3].date, "d3");
        assert!(chart.bars[..4].iter().all(|b| b.ma.is_none()));
        assert_relative_eq!(chart.bars[4].ma.unwrap(), 12.0);
        assert_relative_eq!(chart.bars[5].ma.unwrap(), 13.0);
        assert_eq!(chart.latest_ma(), Some(13.0));

        // Synthetic open follows the previous close.
        assert_eq!(chart.bars[0].open, 10.0);
        assert_eq!(chart.bars[1].open, 10.0);
        assert!(chart.bars[1].is_bullish());
        assert!(chart.bars[2].is_bearish());
        assert_relative_eq!(chart.bars[2].body(), 1.0);
        assert_relative_eq!(chart.bars[0].range(), 10.0 * 0.004, epsilon = 1e-12);
    }

    #[test]
    fn test_overlay_matches_batch_function() {
        let closes = [5.0, 6.5, 7.25, 6.0, 5.5, 8.0, 9.0];
        let chart = ChartBuilder::new().with_period(3).build(&series(&closes)).unwrap();
        let batch = crate::simple_moving_average(&closes, 3).unwrap();
        assert_eq!(chart.moving_average(), batch);
    }

    #[test]
    fn test_empty_series() {
        let chart = ChartBuilder::new().build(&series(&[])).unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart.latest_ma(), None);
    }

    #[test]
    fn test_zero_period() {
        let err = ChartBuilder::new().with_period(0).build(&series(&[1.0])).unwrap_err();
        assert_eq!(err, AggregateError::ZeroPeriod);
    }
}
