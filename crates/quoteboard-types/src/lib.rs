//! Core types for the quoteboard stock dashboard.
//!
//! This crate provides the fundamental data structures used throughout quoteboard:
//!
//! - [`Symbol`] - Normalized ticker symbol
//! - [`Observation`] - A single daily close/volume observation
//! - [`Series`] - Ordered per-symbol history built from a [`HistoryPayload`]
//! - [`Quote`] - Latest valuation fields for one symbol
//! - [`QuoteSnapshot`] - Full-replace list of quotes
//! - [`Lookback`] - History window requested from the data source

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod lookback;
mod observation;
mod quote;
mod symbol;

pub use error::{DataShapeError, QuoteboardError, Result};
pub use lookback::{Lookback, LookbackParseError};
pub use observation::{HistoryPayload, Observation, ReportedRange, Series};
pub use quote::{Quote, QuoteSnapshot, SnapshotSource};
pub use symbol::{Symbol, SymbolError};
