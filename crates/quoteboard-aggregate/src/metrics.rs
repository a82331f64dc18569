//! Summary statistics over the loaded window.

use quoteboard_types::{QuoteSnapshot, Series};
use serde::{Deserialize, Serialize};

/// Price and volume summary for the currently loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    /// Smallest daily volume in the window.
    pub lowest_volume: u64,
    /// Largest daily volume in the window.
    pub highest_volume: u64,
    /// Lowest close in the window.
    pub lowest_price: f64,
    /// Highest close in the window.
    pub highest_price: f64,
    /// Mean daily volume, truncated toward zero.
    pub average_volume: u64,
    /// Market capitalization from the latest quote snapshot.
    pub current_market_cap: u64,
}

impl PeriodMetrics {
    /// Computes metrics for `series`, taking the market cap of `symbol` from
    /// `quotes` (0 if the symbol is absent).
    ///
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn compute(series: &Series, quotes: &QuoteSnapshot, symbol: &str) -> Option<Self> {
        let first = series.observations().first()?;

        let mut lowest_volume = first.volume;
        let mut highest_volume = first.volume;
        let mut lowest_price = first.close;
        let mut highest_price = first.close;
        let mut total_volume: u128 = 0;

        for obs in series.observations() {
            lowest_volume = lowest_volume.min(obs.volume);
            highest_volume = highest_volume.max(obs.volume);
            lowest_price = lowest_price.min(obs.close);
            highest_price = highest_price.max(obs.close);
            total_volume += u128::from(obs.volume);
        }

        // The mean of u64 values always fits in u64.
        let average_volume = (total_volume / series.len() as u128) as u64;

        Some(Self {
            lowest_volume,
            highest_volume,
            lowest_price,
            highest_price,
            average_volume,
            current_market_cap: quotes.market_cap(symbol),
        })
    }

    /// Recomputes metrics, keeping `previous` when the series is empty.
    ///
    /// An empty series shows up during loading transitions; keeping the last
    /// metrics avoids flashing blank or NaN values.
    #[must_use]
    pub fn refresh(
        previous: Option<Self>,
        series: &Series,
        quotes: &QuoteSnapshot,
        symbol: &str,
    ) -> Option<Self> {
        Self::compute(series, quotes, symbol).or(previous)
    }

    /// Highest minus lowest close.
    #[must_use]
    pub fn price_range(&self) -> f64 {
        self.highest_price - self.lowest_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quoteboard_types::{Observation, Quote, SnapshotSource, Symbol};

    fn series(rows: &[(f64, u64)]) -> Series {
        let observations = rows
            .iter()
            .enumerate()
            .map(|(i, &(close, volume))| Observation::new(format!("2024-02-{:02}", i + 1), close, volume))
            .collect();
        Series::new(Symbol::new("HEI").unwrap(), observations)
    }

    fn quotes() -> QuoteSnapshot {
        let quote = Quote {
            symbol: Symbol::new("HEI").unwrap(),
            current_value: 240.1,
            previous_close: 238.0,
            change: 2.1,
            change_pct: 0.88,
            volume: 410_000,
            market_cap: 33_000_000_000,
            pe_ratio: 55.2,
            eps: 3.67,
        };
        QuoteSnapshot::new(vec![quote], SnapshotSource::Poll)
    }

    #[test]
    fn test_compute_extremes_and_average() {
        let metrics =
            PeriodMetrics::compute(&series(&[(12.0, 10), (9.5, 11), (14.25, 12)]), &quotes(), "HEI")
                .unwrap();

        assert_eq!(metrics.lowest_volume, 10);
        assert_eq!(metrics.highest_volume, 12);
        assert_eq!(metrics.lowest_price, 9.5);
        assert_eq!(metrics.highest_price, 14.25);
        assert_eq!(metrics.average_volume, 11);
        assert_eq!(metrics.current_market_cap, 33_000_000_000);
        assert_eq!(metrics.price_range(), 4.75);
    }

    #[test]
    fn test_average_volume_truncates() {
        let metrics =
            PeriodMetrics::compute(&series(&[(1.0, 10), (1.0, 10), (1.0, 11)]), &quotes(), "HEI")
                .unwrap();
        // 31 / 3 = 10.33
        assert_eq!(metrics.average_volume, 10);

        let metrics =
            PeriodMetrics::compute(&series(&[(1.0, 1), (1.0, 2)]), &quotes(), "HEI").unwrap();
        // 1.5 truncates, never rounds up
        assert_eq!(metrics.average_volume, 1);
    }

    #[test]
    fn test_average_volume_does_not_overflow() {
        let metrics = PeriodMetrics::compute(
            &series(&[(1.0, u64::MAX), (1.0, u64::MAX)]),
            &quotes(),
            "HEI",
        )
        .unwrap();
        assert_eq!(metrics.average_volume, u64::MAX);
    }

    #[test]
    fn test_single_observation_is_reflexive() {
        let metrics = PeriodMetrics::compute(&series(&[(42.0, 7)]), &quotes(), "HEI").unwrap();
        assert_eq!(metrics.lowest_price, metrics.highest_price);
        assert_eq!(metrics.lowest_volume, metrics.highest_volume);
        assert_eq!(metrics.average_volume, 7);
    }

    #[test]
    fn test_missing_symbol_market_cap_is_zero() {
        let metrics = PeriodMetrics::compute(&series(&[(1.0, 1)]), &quotes(), "RCAT").unwrap();
        assert_eq!(metrics.current_market_cap, 0);
    }

    #[test]
    fn test_empty_series_keeps_previous() {
        let previous =
            PeriodMetrics::compute(&series(&[(3.0, 30), (4.0, 40)]), &quotes(), "HEI");
        assert!(previous.is_some());

        let empty = series(&[]);
        assert_eq!(PeriodMetrics::compute(&empty, &quotes(), "HEI"), None);
        assert_eq!(PeriodMetrics::refresh(previous, &empty, &quotes(), "HEI"), previous);
        assert_eq!(PeriodMetrics::refresh(None, &empty, &quotes(), "HEI"), None);
    }

    #[test]
    fn test_refresh_replaces_previous() {
        let previous = PeriodMetrics::compute(&series(&[(3.0, 30)]), &quotes(), "HEI");
        let next = PeriodMetrics::refresh(previous, &series(&[(5.0, 50)]), &quotes(), "HEI").unwrap();
        assert_eq!(next.highest_price, 5.0);
        assert_eq!(next.average_volume, 50);
    }

    #[test]
    fn test_serializes_camel_case() {
        let metrics = PeriodMetrics::compute(&series(&[(2.5, 3)]), &quotes(), "HEI").unwrap();
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["lowestPrice"], 2.5);
        assert_eq!(json["averageVolume"], 3);
    }
}
