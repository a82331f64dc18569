//! Dashboard view state and its reducer.
//!
//! [`DashboardState`] is an immutable snapshot of everything the dashboard
//! shows. [`DashboardState::reduce`] turns one [`Event`] into the next state
//! plus at most one [`Effect`] for the driver to perform. The reducer does no
//! I/O, so the same event sequence always produces the same states.

use chrono::{DateTime, Utc};
use quoteboard_aggregate::{ChartBuilder, ChartSeries, PeriodMetrics};
use quoteboard_types::{Lookback, QuoteSnapshot, Series, Symbol};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::Generation;

/// Settings that shape how history is fetched and charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewConfig {
    /// Lookback requested for every history fetch.
    pub lookback: Lookback,
    /// Overlay window and OHLC policy.
    pub chart: ChartBuilder,
}

impl ViewConfig {
    /// Sets the lookback.
    #[must_use]
    pub const fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the chart builder.
    #[must_use]
    pub const fn with_chart(mut self, chart: ChartBuilder) -> Self {
        self.chart = chart;
        self
    }
}

/// Input to the reducer.
#[derive(Debug, Clone)]
pub enum Event {
    /// A full quote snapshot arrived from the update channel.
    QuotesReceived(QuoteSnapshot),
    /// The user picked a symbol.
    SymbolSelected(Symbol),
    /// A history fetch completed.
    HistoryLoaded {
        /// Generation the fetch was issued with.
        generation: Generation,
        /// Symbol the fetch was issued for.
        symbol: Symbol,
        /// Validated history.
        series: Series,
    },
    /// A history fetch failed.
    HistoryFailed {
        /// Generation the fetch was issued with.
        generation: Generation,
        /// Symbol the fetch was issued for.
        symbol: Symbol,
        /// Human-readable failure.
        error: String,
    },
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full history of `symbol` and report back with `generation`.
    FetchHistory {
        /// Symbol to fetch.
        symbol: Symbol,
        /// Lookback to request.
        lookback: Lookback,
        /// Generation to tag the completion with.
        generation: Generation,
    },
}

/// Result of applying one event.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The next state.
    pub state: DashboardState,
    /// Follow-up work, if any.
    pub effect: Option<Effect>,
}

impl Transition {
    fn state_only(state: DashboardState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Everything the dashboard currently displays.
///
/// Large members sit behind [`Arc`] so publishing a new state is cheap.
#[derive(Debug, Clone)]
pub struct DashboardState {
    config: ViewConfig,
    selected: Option<Symbol>,
    quotes: Arc<QuoteSnapshot>,
    series: Option<Arc<Series>>,
    chart: Option<Arc<ChartSeries>>,
    metrics: Option<PeriodMetrics>,
    generation: Generation,
    loading: bool,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl DashboardState {
    /// Creates an empty state with nothing selected.
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            selected: None,
            quotes: Arc::new(QuoteSnapshot::empty()),
            series: None,
            chart: None,
            metrics: None,
            generation: Generation::INITIAL,
            loading: false,
            last_error: None,
            updated_at: None,
            revision: 0,
        }
    }

    /// Returns the view settings.
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the selected symbol.
    #[must_use]
    pub const fn selected(&self) -> Option<&Symbol> {
        self.selected.as_ref()
    }

    /// Returns the latest quote snapshot.
    #[must_use]
    pub fn quotes(&self) -> &QuoteSnapshot {
        &self.quotes
    }

    /// Returns the loaded history, if any.
    #[must_use]
    pub fn series(&self) -> Option<&Series> {
        self.series.as_deref()
    }

    /// Returns the chart rows for the loaded history, if any.
    #[must_use]
    pub fn chart(&self) -> Option<&ChartSeries> {
        self.chart.as_deref()
    }

    /// Returns the period metrics, if any have been computed.
    #[must_use]
    pub const fn metrics(&self) -> Option<&PeriodMetrics> {
        self.metrics.as_ref()
    }

    /// Returns the generation of the latest issued history request.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns true while the latest history request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the most recent history failure for the current request.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns when the latest quote snapshot was received.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns a counter bumped on every applied change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one event.
    #[must_use]
    pub fn reduce(&self, event: Event) -> Transition {
        match event {
            Event::QuotesReceived(snapshot) => self.on_quotes(snapshot),
            Event::SymbolSelected(symbol) => self.on_select(symbol),
            Event::HistoryLoaded {
                generation,
                symbol,
                series,
            } => self.on_history(generation, &symbol, series),
            Event::HistoryFailed {
                generation,
                symbol,
                error,
            } => self.on_failure(generation, &symbol, error),
        }
    }

    fn on_quotes(&self, snapshot: QuoteSnapshot) -> Transition {
        if snapshot.sequence < self.quotes.sequence {
            debug!(
                sequence = snapshot.sequence,
                current = self.quotes.sequence,
                "dropping out-of-order quote snapshot"
            );
            return Transition::state_only(self.clone());
        }

        let mut next = self.clone();
        next.updated_at = Some(snapshot.received_at);
        next.quotes = Arc::new(snapshot);
        next.metrics = next.recompute_metrics();
        next.revision += 1;
        Transition::state_only(next)
    }

    fn on_select(&self, symbol: Symbol) -> Transition {
        let generation = self.generation.next();
        debug!(%symbol, %generation, "symbol selected");

        let mut next = self.clone();
        next.selected = Some(symbol.clone());
        next.generation = generation;
        next.loading = true;
        next.last_error = None;
        next.revision += 1;

        Transition {
            state: next,
            effect: Some(Effect::FetchHistory {
                symbol,
                lookback: self.config.lookback,
                generation,
            }),
        }
    }

    fn on_history(&self, generation: Generation, symbol: &Symbol, series: Series) -> Transition {
        if !self.is_current(generation, symbol) {
            debug!(%symbol, %generation, latest = %self.generation, "discarding stale history");
            return Transition::state_only(self.clone());
        }

        let mut next = self.clone();
        next.loading = false;
        next.revision += 1;

        match self.config.chart.build(&series) {
            Ok(chart) => {
                next.last_error = None;
                next.chart = Some(Arc::new(chart));
                next.series = Some(Arc::new(series));
                next.metrics = next.recompute_metrics();
            }
            Err(e) => {
                warn!(%symbol, error = %e, "cannot chart history");
                next.last_error = Some(e.to_string());
            }
        }

        Transition::state_only(next)
    }

    fn on_failure(&self, generation: Generation, symbol: &Symbol, error: String) -> Transition {
        if !self.is_current(generation, symbol) {
            debug!(%symbol, %generation, "ignoring failure of superseded request");
            return Transition::state_only(self.clone());
        }

        warn!(%symbol, %error, "history fetch failed, keeping previous view");
        let mut next = self.clone();
        next.loading = false;
        next.last_error = Some(error);
        next.revision += 1;
        Transition::state_only(next)
    }

    fn is_current(&self, generation: Generation, symbol: &Symbol) -> bool {
        generation == self.generation && self.selected.as_ref() == Some(symbol)
    }

    fn recompute_metrics(&self) -> Option<PeriodMetrics> {
        let Some(series) = self.series.as_deref() else {
            return self.metrics;
        };
        // Market cap follows the series on screen, not a pending selection.
        PeriodMetrics::refresh(self.metrics, series, &self.quotes, series.symbol().as_str())
    }
}
