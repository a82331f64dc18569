//! Error types for quoteboard.

use thiserror::Error;

use crate::SymbolError;

/// Result type alias for quoteboard operations.
pub type Result<T> = std::result::Result<T, QuoteboardError>;

/// Errors that can occur while fetching and preparing dashboard data.
#[derive(Error, Debug)]
pub enum QuoteboardError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The data source answered with an error message instead of data.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A payload did not have the expected shape.
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    /// Invalid ticker symbol.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for history payloads whose arrays cannot be zipped into a series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    /// The primary arrays differ in length.
    #[error(
        "History arrays differ in length: {dates} dates, {prices} prices, {volumes} volumes"
    )]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of close prices.
        prices: usize,
        /// Number of volumes.
        volumes: usize,
    },

    /// An optional OHLC array is present but does not match the series length.
    #[error("History field '{field}' has {len} entries, expected {expected}")]
    FieldLength {
        /// Name of the offending field.
        field: &'static str,
        /// Number of entries found.
        len: usize,
        /// Number of entries expected.
        expected: usize,
    },

    /// A close price is NaN or infinite.
    #[error("Non-finite close price at index {index}")]
    NonFinitePrice {
        /// Index of the offending observation.
        index: usize,
    },
}
