//! History lookback window definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lookback window requested from the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lookback {
    /// One trading day.
    #[serde(rename = "1d")]
    Day1,
    /// Five trading days.
    #[serde(rename = "5d")]
    Day5,
    /// One month.
    #[default]
    #[serde(rename = "1mo")]
    Month1,
    /// Three months.
    #[serde(rename = "3mo")]
    Month3,
    /// Six months.
    #[serde(rename = "6mo")]
    Month6,
    /// One year.
    #[serde(rename = "1y")]
    Year1,
    /// Two years.
    #[serde(rename = "2y")]
    Year2,
    /// Five years.
    #[serde(rename = "5y")]
    Year5,
    /// Ten years.
    #[serde(rename = "10y")]
    Year10,
    /// Year to date.
    #[serde(rename = "ytd")]
    YearToDate,
    /// All available history.
    #[serde(rename = "max")]
    Max,
}

impl Lookback {
    /// Returns the query parameter value for this lookback.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1d",
            Self::Day5 => "5d",
            Self::Month1 => "1mo",
            Self::Month3 => "3mo",
            Self::Month6 => "6mo",
            Self::Year1 => "1y",
            Self::Year2 => "2y",
            Self::Year5 => "5y",
            Self::Year10 => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    /// Returns the approximate number of trading days covered, or None for
    /// open-ended windows.
    #[must_use]
    pub const fn approx_trading_days(&self) -> Option<usize> {
        match self {
            Self::Day1 => Some(1),
            Self::Day5 => Some(5),
            Self::Month1 => Some(21),
            Self::Month3 => Some(63),
            Self::Month6 => Some(126),
            Self::Year1 => Some(252),
            Self::Year2 => Some(504),
            Self::Year5 => Some(1260),
            Self::Year10 => Some(2520),
            Self::YearToDate | Self::Max => None,
        }
    }

    /// Returns all available lookbacks.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Day1,
            Self::Day5,
            Self::Month1,
            Self::Month3,
            Self::Month6,
            Self::Year1,
            Self::Year2,
            Self::Year5,
            Self::Year10,
            Self::YearToDate,
            Self::Max,
        ]
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = LookbackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "day" => Ok(Self::Day1),
            "5d" | "week" => Ok(Self::Day5),
            "1mo" | "1m" | "month" => Ok(Self::Month1),
            "3mo" | "3m" => Ok(Self::Month3),
            "6mo" | "6m" => Ok(Self::Month6),
            "1y" | "year" => Ok(Self::Year1),
            "2y" => Ok(Self::Year2),
            "5y" => Ok(Self::Year5),
            "10y" => Ok(Self::Year10),
            "ytd" => Ok(Self::YearToDate),
            "max" | "all" => Ok(Self::Max),
            _ => Err(LookbackParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid lookback string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookbackParseError(String);

impl std::fmt::Display for LookbackParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid lookback '{}', expected one of: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max",
            self.0
        )
    }
}

impl std::error::Error for LookbackParseError {}
