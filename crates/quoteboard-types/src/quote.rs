//! Latest-quote records and full-replace quote snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Symbol;

/// Latest valuation fields for one symbol.
///
/// Field names follow the camelCase wire format of the quote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Last traded price.
    pub current_value: f64,
    /// Previous session's close.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub previous_close: f64,
    /// Absolute change against the previous close.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub change: f64,
    /// Percentage change against the previous close.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub change_pct: f64,
    /// Session volume.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub volume: u64,
    /// Market capitalization.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub market_cap: u64,
    /// Forward price/earnings ratio.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub pe_ratio: f64,
    /// Trailing earnings per share.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub eps: f64,
}

impl Quote {
    /// Returns true if the price moved up against the previous close.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change > 0.0
    }

    /// Returns true if the price moved down against the previous close.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.change < 0.0
    }
}

/// The data source fills missing fields with `null`; treat those as zero.
fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Which update path delivered a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// WebSocket push feed.
    #[default]
    Push,
    /// HTTP poll.
    Poll,
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push => f.write_str("push"),
            Self::Poll => f.write_str("poll"),
        }
    }
}

/// Complete list of latest quotes.
///
/// Each snapshot replaces the previous one wholesale; snapshots are never
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Quotes in the order delivered.
    pub quotes: Vec<Quote>,
    /// When the snapshot was received.
    pub received_at: DateTime<Utc>,
    /// Which update path delivered it.
    pub source: SnapshotSource,
    /// Ordering stamp assigned by the update channel.
    pub sequence: u64,
}

impl QuoteSnapshot {
    /// Creates a snapshot received now.
    #[must_use]
    pub fn new(quotes: Vec<Quote>, source: SnapshotSource) -> Self {
        Self {
            quotes,
            received_at: Utc::now(),
            source,
            sequence: 0,
        }
    }

    /// Creates an empty snapshot, used before any data has arrived.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), SnapshotSource::default())
    }

    /// Sets the ordering stamp.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Looks up the quote for a symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.symbol.as_str() == symbol)
    }

    /// Returns the market capitalization for a symbol, or 0 if it is absent.
    #[must_use]
    pub fn market_cap(&self, symbol: &str) -> u64 {
        self.get(symbol).map_or(0, |q| q.market_cap)
    }

    /// Returns the number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the snapshot has no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for QuoteSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_QUOTE: &str = r#"{
        "symbol": "LDOS",
        "currentValue": 118.42,
        "previousClose": 117.9,
        "change": 0.52,
        "changePct": 0.44,
        "volume": 812345,
        "marketCap": 16020000000,
        "peRatio": null,
        "eps": 1.45
    }"#;

    #[test]
    fn test_quote_deserializes_camel_case() {
        let quote: Quote = serde_json::from_str(BACKEND_QUOTE).unwrap();
        assert_eq!(quote.symbol.as_str(), "LDOS");
        assert_eq!(quote.market_cap, 16_020_000_000);
        assert_eq!(quote.pe_ratio, 0.0);
        assert!(quote.is_up());
        assert!(!quote.is_down());
    }

    #[test]
    fn test_snapshot_lookup() {
        let quote: Quote = serde_json::from_str(BACKEND_QUOTE).unwrap();
        let snapshot = QuoteSnapshot::new(vec![quote], SnapshotSource::Poll).with_sequence(7);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.sequence, 7);
        assert!(snapshot.get("LDOS").is_some());
        assert_eq!(snapshot.market_cap("LDOS"), 16_020_000_000);
        assert_eq!(snapshot.market_cap("PLTR"), 0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = QuoteSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.source, SnapshotSource::Push);
    }
}
