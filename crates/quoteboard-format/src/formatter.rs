//! Output format abstraction.

use quoteboard_aggregate::ChartSeries;
use quoteboard_types::Quote;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson]
    }

    /// Writes chart rows in this format with default formatter settings.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_chart<W: Write + Send>(
        &self,
        chart: &ChartSeries,
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => crate::CsvFormatter::new().write_chart(chart, writer),
            Self::Json => crate::JsonFormatter::new().write_chart(chart, writer),
            Self::Ndjson => crate::JsonFormatter::ndjson().write_chart(chart, writer),
        }
    }

    /// Writes quotes in this format with default formatter settings.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_quotes<W: Write + Send>(&self, quotes: &[Quote], writer: W) -> Result<(), FormatError> {
        match self {
            Self::Csv => crate::CsvFormatter::new().write_quotes(quotes, writer),
            Self::Json => crate::JsonFormatter::new().write_quotes(quotes, writer),
            Self::Ndjson => crate::JsonFormatter::ndjson().write_quotes(quotes, writer),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes chart rows (OHLC, volume and overlay) to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_chart<W: Write + Send>(&self, chart: &ChartSeries, writer: W) -> Result<(), FormatError>;

    /// Writes a quote snapshot to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_quotes<W: Write + Send>(&self, quotes: &[Quote], writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
