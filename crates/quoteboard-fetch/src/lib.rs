//! HTTP client and quote feed for the quoteboard stock dashboard.
//!
//! This crate provides the data acquisition layer:
//!
//! - [`url`] - Endpoint URL construction
//! - [`ApiClient`] - HTTP client with retries for quote snapshots and history
//! - [`QuoteFeed`] - WebSocket push feed of quote snapshots
//! - [`QuoteSource`] / [`HistorySource`] / [`PushSource`] - Traits the dashboard is driven through

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod feed;
mod source;
pub mod url;

pub use client::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use feed::{QuoteFeed, QuoteStream};
pub use source::{HistorySource, PushSource, QuoteSource};
