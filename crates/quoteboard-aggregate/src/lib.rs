//! Moving-average overlay and period metrics for the quoteboard stock dashboard.
//!
//! This crate turns a daily [`Series`](quoteboard_types::Series) into
//! display-ready data:
//!
//! - [`MovingAverage`] - Streaming trailing simple moving average
//! - [`simple_moving_average`] - Aligned moving-average overlay for a slice of closes
//! - [`ChartBuilder`] - Builds a [`ChartSeries`] of [`ChartBar`]s with an OHLC policy
//! - [`PeriodMetrics`] - Summary statistics over the loaded window

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chart;
mod error;
mod metrics;
mod moving_average;
mod ohlc;

pub use chart::{ChartBar, ChartBuilder, ChartSeries};
pub use error::AggregateError;
pub use metrics::PeriodMetrics;
pub use moving_average::{DEFAULT_PERIOD, MovingAverage, simple_moving_average};
pub use ohlc::{OhlcPolicy, SYNTHETIC_HIGH_FACTOR, SYNTHETIC_LOW_FACTOR, synthetic_open};
