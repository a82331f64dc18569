//! Fixtures for the quoteboard benchmarks.
//!
//! Run with: `cargo bench --package quoteboard-bench`

use quoteboard_lib::{Observation, Quote, QuoteSnapshot, ReportedRange, Series, SnapshotSource, Symbol};

/// Trading-day counts matching common lookbacks (1mo, 1y, 10y).
pub const SIZES: [(&str, usize); 3] = [("1mo", 21), ("1y", 252), ("10y", 2520)];

/// Builds a deterministic daily series of `days` observations.
///
/// Closes follow a bounded sawtooth so the overlay never degenerates into a
/// constant, and every row carries a reported range.
#[must_use]
pub fn synthetic_series(symbol: &str, days: usize) -> Series {
    let observations = (0..days)
        .map(|i| {
            let close = 100.0 + ((i * 7) % 23) as f64 - 11.0;
            let volume = 1_000_000 + ((i * 7_919) % 500_000) as u64;
            Observation::new(format!("day-{i:05}"), close, volume).with_reported(ReportedRange {
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
            })
        })
        .collect();

    Series::new(Symbol::new(symbol).expect("valid benchmark symbol"), observations)
}

/// Builds a snapshot holding one quote for `symbol`.
#[must_use]
pub fn snapshot_for(symbol: &str) -> QuoteSnapshot {
    let quote = Quote {
        symbol: Symbol::new(symbol).expect("valid benchmark symbol"),
        current_value: 100.0,
        previous_close: 99.5,
        change: 0.5,
        change_pct: 0.5,
        volume: 1_200_000,
        market_cap: 50_000_000_000,
        pe_ratio: 20.0,
        eps: 5.0,
    };
    QuoteSnapshot::new(vec![quote], SnapshotSource::Poll)
}
