//! Default watchlist for the quoteboard stock dashboard.
//!
//! The dashboard tracks a fixed set of tickers. This crate embeds that set
//! with display metadata and exposes it through a global registry.
//!
//! # Example
//!
//! ```
//! use quoteboard_watchlist::Watchlist;
//!
//! let watchlist = Watchlist::global();
//!
//! if let Some(entry) = watchlist.get("pltr") {
//!     println!("{}: {}", entry.symbol, entry.name);
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use quoteboard_types::Symbol;
use serde::{Deserialize, Serialize};

/// The watchlist JSON embedded at compile time.
const WATCHLIST_JSON: &str = include_str!("../data/watchlist.json");

/// Global watchlist instance.
static WATCHLIST: OnceLock<Watchlist> = OnceLock::new();

/// A tracked ticker with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Company name.
    pub name: String,
    /// Sector label.
    #[serde(default)]
    pub sector: String,
}

/// Ordered set of tracked tickers.
#[derive(Debug, Clone)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
    index: HashMap<Symbol, usize>,
}

impl Watchlist {
    /// Returns the global default watchlist.
    ///
    /// The watchlist is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        WATCHLIST.get_or_init(Self::load)
    }

    /// Loads the watchlist from the embedded JSON data.
    fn load() -> Self {
        let entries: Vec<WatchlistEntry> =
            serde_json::from_str(WATCHLIST_JSON).expect("Invalid watchlist.json");
        Self::from_entries(entries)
    }

    /// Builds a watchlist from entries, keeping the first occurrence of
    /// each symbol.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = WatchlistEntry>) -> Self {
        let mut kept = Vec::new();
        let mut index = HashMap::new();
        for entry in entries {
            if !index.contains_key(&entry.symbol) {
                index.insert(entry.symbol.clone(), kept.len());
                kept.push(entry);
            }
        }
        Self {
            entries: kept,
            index,
        }
    }

    /// Builds a watchlist from bare symbols, using the default watchlist's
    /// metadata where available.
    #[must_use]
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let defaults = Self::global();
        Self::from_entries(symbols.into_iter().map(|symbol| {
            defaults.get(symbol.as_str()).cloned().unwrap_or(WatchlistEntry {
                name: symbol.to_string(),
                symbol,
                sector: String::new(),
            })
        }))
    }

    /// Looks up an entry by symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&WatchlistEntry> {
        self.index
            .get(symbol.trim().to_ascii_uppercase().as_str())
            .map(|&i| &self.entries[i])
    }

    /// Returns true if the symbol is tracked.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Returns all entries in watchlist order.
    pub fn all(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.entries.iter()
    }

    /// Returns the tracked symbols in watchlist order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|e| &e.symbol)
    }

    /// Returns the first symbol, used as the initial selection.
    #[must_use]
    pub fn first(&self) -> Option<&Symbol> {
        self.entries.first().map(|e| &e.symbol)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the watchlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Searches entries by symbol, name or sector (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&WatchlistEntry> {
        let pattern = pattern.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.symbol.as_str().to_lowercase().contains(&pattern)
                    || e.name.to_lowercase().contains(&pattern)
                    || e.sector.to_lowercase().contains(&pattern)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_watchlist_loads() {
        let watchlist = Watchlist::global();
        assert_eq!(watchlist.len(), 10);
        assert_eq!(watchlist.first().map(Symbol::as_str), Some("HII"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let watchlist = Watchlist::global();
        assert_eq!(watchlist.get("pltr").unwrap().name, "Palantir Technologies");
        assert!(watchlist.contains(" ktos "));
        assert!(!watchlist.contains("AAPL"));
    }

    #[test]
    fn test_search() {
        let results = Watchlist::global().search("dynamics");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol.as_str(), "GD");
    }

    #[test]
    fn test_from_symbols_reuses_metadata_and_dedups() {
        let symbols = ["gd", "AAPL", "GD"].map(|s| Symbol::new(s).unwrap());
        let watchlist = Watchlist::from_symbols(symbols);

        assert_eq!(watchlist.len(), 2);
        assert_eq!(watchlist.get("GD").unwrap().name, "General Dynamics");
        assert_eq!(watchlist.get("AAPL").unwrap().name, "AAPL");
        let order: Vec<_> = watchlist.symbols().map(Symbol::as_str).collect();
        assert_eq!(order, ["GD", "AAPL"]);
    }
}
