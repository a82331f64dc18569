//! Stock dashboard library: moving-average charts, period metrics and live quotes.
//!
//! This is a facade crate that re-exports functionality from the quoteboard
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use quoteboard_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_defaults()?;
//!     let symbol = Watchlist::global().first().unwrap().clone();
//!
//!     let series = client.history(&symbol, Lookback::Month1).await?;
//!     let chart = ChartBuilder::new().with_period(5).build(&series)?;
//!     println!("{} rows, latest MA {:?}", chart.len(), chart.latest_ma());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use quoteboard_types::*;

// Re-export the watchlist
pub use quoteboard_watchlist::{Watchlist, WatchlistEntry};

// Re-export chart computations
pub use quoteboard_aggregate::{
    AggregateError, ChartBar, ChartBuilder, ChartSeries, DEFAULT_PERIOD, MovingAverage, OhlcPolicy,
    PeriodMetrics, simple_moving_average,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use quoteboard_fetch::{
    ApiClient, ClientConfig, DEFAULT_BASE_URL, FetchError, HistorySource, PushSource, QuoteFeed,
    QuoteSource, QuoteStream,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use quoteboard_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

// Re-export the dashboard runtime
#[cfg(feature = "dashboard")]
pub use quoteboard_dashboard::{
    ChannelConfig, Dashboard, DashboardHandle, DashboardState, Effect, Event, Generation,
    Transition, UpdateChannel, ViewConfig,
};

/// Prelude module for convenient imports.
///
/// ```
/// use quoteboard_lib::prelude::*;
/// ```
pub mod prelude {
    pub use quoteboard_types::{
        HistoryPayload, Lookback, Observation, Quote, QuoteSnapshot, QuoteboardError, Result,
        Series, SnapshotSource, Symbol,
    };

    pub use quoteboard_watchlist::Watchlist;

    pub use quoteboard_aggregate::{ChartBuilder, ChartSeries, OhlcPolicy, PeriodMetrics};

    #[cfg(feature = "fetch")]
    pub use quoteboard_fetch::{ApiClient, ClientConfig, QuoteFeed};

    #[cfg(feature = "format")]
    pub use quoteboard_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(feature = "dashboard")]
    pub use quoteboard_dashboard::{
        ChannelConfig, Dashboard, DashboardHandle, DashboardState, UpdateChannel, ViewConfig,
    };
}
