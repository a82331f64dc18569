//! Dashboard state and update pipeline for quoteboard.
//!
//! - [`DashboardState`] / [`Event`] / [`Effect`] - Immutable view state and its pure reducer
//! - [`Generation`] - Tags history requests so late responses are discarded
//! - [`UpdateChannel`] - Push-first quote updates with a poll backstop
//! - [`Dashboard`] - Task that applies events in order and publishes states

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quoteboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod channel;
mod driver;
mod generation;
mod state;

pub use channel::{
    ChannelConfig, DEFAULT_POLL_INTERVAL, DEFAULT_PUSH_TIMEOUT, DEFAULT_RECONNECT_DELAY,
    UpdateChannel,
};
pub use driver::{Dashboard, DashboardHandle};
pub use generation::Generation;
pub use state::{DashboardState, Effect, Event, Transition, ViewConfig};
