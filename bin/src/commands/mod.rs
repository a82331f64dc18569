//! CLI command implementations.

use anyhow::{Context, Result};
use quoteboard_lib::prelude::*;

pub(crate) mod chart;
pub(crate) mod list;
pub(crate) mod quotes;
pub(crate) mod watch;

/// Backend locations shared by every networked command.
pub(crate) struct Endpoints {
    pub(crate) api_url: String,
    pub(crate) ws_url: Option<String>,
}

impl Endpoints {
    /// Builds the HTTP client for the configured backend.
    pub(crate) fn client(&self) -> Result<ApiClient> {
        let config = ClientConfig::default().with_base_url(&self.api_url);
        ApiClient::new(config).context("Failed to build HTTP client")
    }

    /// Builds the push feed, preferring an explicit WebSocket URL.
    pub(crate) fn feed(&self) -> Result<QuoteFeed> {
        match &self.ws_url {
            Some(url) => Ok(QuoteFeed::new(url.clone())),
            None => QuoteFeed::from_base_url(&self.api_url)
                .with_context(|| format!("Cannot derive feed URL from {}", self.api_url)),
        }
    }
}

/// Parses a symbol argument, checking it against the watchlist.
pub(crate) fn parse_symbol(input: &str) -> Result<Symbol> {
    let symbol = Symbol::new(input).with_context(|| format!("Invalid symbol: {input}"))?;
    if !Watchlist::global().contains(symbol.as_str()) {
        tracing::warn!(%symbol, "symbol is not on the watchlist");
    }
    Ok(symbol)
}

/// Parses a lookback argument such as `1mo`.
pub(crate) fn parse_lookback(input: &str) -> Result<Lookback> {
    input.parse::<Lookback>().map_err(|e| anyhow::anyhow!("{e}"))
}
