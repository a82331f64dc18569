//! Data-source traits the dashboard is driven through.

use async_trait::async_trait;
use quoteboard_types::{Lookback, Quote, Series, Symbol};

use crate::{ApiClient, FetchError, QuoteFeed, QuoteStream};

/// Something that can produce a full quote snapshot on demand.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches the complete current quote list.
    async fn quotes(&self) -> Result<Vec<Quote>, FetchError>;
}

/// Something that can produce a symbol's daily history.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetches the full history for `symbol` over `lookback`.
    async fn history(&self, symbol: &Symbol, lookback: Lookback) -> Result<Series, FetchError>;
}

/// Something that can open a stream of pushed quote snapshots.
#[async_trait]
pub trait PushSource: Send + Sync {
    /// Opens a new subscription. Each call starts a fresh connection.
    async fn subscribe(&self) -> Result<QuoteStream, FetchError>;
}

#[async_trait]
impl QuoteSource for ApiClient {
    async fn quotes(&self) -> Result<Vec<Quote>, FetchError> {
        Self::quotes(self).await
    }
}

#[async_trait]
impl HistorySource for ApiClient {
    async fn history(&self, symbol: &Symbol, lookback: Lookback) -> Result<Series, FetchError> {
        Self::history(self, symbol, lookback).await
    }
}

#[async_trait]
impl PushSource for QuoteFeed {
    async fn subscribe(&self) -> Result<QuoteStream, FetchError> {
        Self::subscribe(self).await
    }
}
