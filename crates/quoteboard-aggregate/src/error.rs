//! Aggregation errors.

use thiserror::Error;

/// Errors that can occur while deriving chart data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A moving average needs a window of at least one observation.
    #[error("moving-average period must be at least 1")]
    ZeroPeriod,
}
