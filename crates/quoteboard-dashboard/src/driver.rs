//! Runtime that applies events to the dashboard state.

use quoteboard_fetch::HistorySource;
use quoteboard_types::{QuoteSnapshot, Symbol};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{DashboardState, Effect, Event};

/// Owns the dashboard state and the history source.
///
/// [`Dashboard::spawn`] moves it onto a task that applies every event in
/// arrival order and publishes each new state through a watch channel.
pub struct Dashboard {
    history: Arc<dyn HistorySource>,
    state: DashboardState,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Creates a dashboard starting from `state`.
    #[must_use]
    pub fn new(history: Arc<dyn HistorySource>, state: DashboardState) -> Self {
        Self { history, state }
    }

    /// Starts the event loop.
    ///
    /// Quote snapshots come from `snapshots`, usually an
    /// [`UpdateChannel`](crate::UpdateChannel). The loop ends when the
    /// returned handle is shut down or dropped.
    #[must_use]
    pub fn spawn(self, snapshots: mpsc::Receiver<QuoteSnapshot>) -> DashboardHandle {
        let (state_tx, state_rx) = watch::channel(self.state.clone());
        let (select_tx, select_rx) = mpsc::channel(16);
        let task = tokio::spawn(self.run(snapshots, select_rx, state_tx));

        DashboardHandle {
            selections: select_tx,
            state: state_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut snapshots: mpsc::Receiver<QuoteSnapshot>,
        mut selections: mpsc::Receiver<Symbol>,
        state_tx: watch::Sender<DashboardState>,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Event>();
        let mut snapshots_open = true;

        loop {
            let event = tokio::select! {
                symbol = selections.recv() => match symbol {
                    Some(symbol) => Event::SymbolSelected(symbol),
                    None => break,
                },
                snapshot = snapshots.recv(), if snapshots_open => match snapshot {
                    Some(snapshot) => Event::QuotesReceived(snapshot),
                    None => {
                        info!("quote updates ended");
                        snapshots_open = false;
                        continue;
                    }
                },
                Some(event) = done_rx.recv() => event,
            };

            let transition = self.state.reduce(event);
            self.state = transition.state;
            state_tx.send_replace(self.state.clone());

            if let Some(effect) = transition.effect {
                self.perform(effect, done_tx.clone());
            }
        }

        debug!("dashboard stopped");
    }

    fn perform(&self, effect: Effect, done: mpsc::UnboundedSender<Event>) {
        match effect {
            Effect::FetchHistory {
                symbol,
                lookback,
                generation,
            } => {
                let history = Arc::clone(&self.history);
                tokio::spawn(async move {
                    let event = match history.history(&symbol, lookback).await {
                        Ok(series) => Event::HistoryLoaded {
                            generation,
                            symbol,
                            series,
                        },
                        Err(e) => Event::HistoryFailed {
                            generation,
                            symbol,
                            error: e.to_string(),
                        },
                    };
                    // The loop may already be gone.
                    let _ = done.send(event);
                });
            }
        }
    }
}

/// Handle to a running [`Dashboard`].
#[derive(Debug)]
pub struct DashboardHandle {
    selections: mpsc::Sender<Symbol>,
    state: watch::Receiver<DashboardState>,
    task: JoinHandle<()>,
}

impl DashboardHandle {
    /// Selects a symbol, starting a history fetch.
    ///
    /// Returns false if the dashboard has stopped.
    #[must_use]
    pub async fn select(&self, symbol: Symbol) -> bool {
        self.selections.send(symbol).await.is_ok()
    }

    /// Returns the latest published state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    /// Stops the event loop and waits for it to finish.
    pub async fn shutdown(self) {
        drop(self.selections);
        // A panicked loop has nothing left to clean up.
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quoteboard_fetch::FetchError;
    use quoteboard_types::{Lookback, Observation, Series, SnapshotSource};
    use std::time::Duration;

    /// History source with a per-symbol delay; "FAIL" always errors.
    struct SlowHistory;

    #[async_trait]
    impl HistorySource for SlowHistory {
        async fn history(&self, symbol: &Symbol, _lookback: Lookback) -> Result<Series, FetchError> {
            let delay = match symbol.as_str() {
                "SLOW" => Duration::from_secs(5),
                _ => Duration::from_secs(1),
            };
            tokio::time::sleep(delay).await;
            if symbol.as_str() == "FAIL" {
                return Err(FetchError::Upstream("no data".to_string()));
            }
            let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
            let observations = closes
                .iter()
                .enumerate()
                .map(|(i, &c)| Observation::new(format!("2024-03-{:02}", i + 1), c, 10))
                .collect();
            Ok(Series::new(symbol.clone(), observations))
        }
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn start() -> (DashboardHandle, mpsc::Sender<QuoteSnapshot>) {
        let (tx, rx) = mpsc::channel(8);
        let handle = Dashboard::new(Arc::new(SlowHistory), DashboardState::default()).spawn(rx);
        (handle, tx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_selection_wins() {
        let (handle, _tx) = start();

        assert!(handle.select(sym("SLOW")).await);
        assert!(handle.select(sym("FAST")).await);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let state = handle.state();
        assert_eq!(state.selected(), Some(&sym("FAST")));
        assert_eq!(state.chart().unwrap().symbol, sym("FAST"));
        assert!(!state.is_loading());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_previous_chart() {
        let (handle, _tx) = start();

        assert!(handle.select(sym("HII")).await);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.select(sym("FAIL")).await);
        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = handle.state();
        assert_eq!(state.chart().unwrap().symbol, sym("HII"));
        assert_eq!(state.last_error(), Some("Upstream error: no data"));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshots_are_published() {
        let (handle, tx) = start();
        let mut updates = handle.subscribe();

        tx.send(QuoteSnapshot::new(Vec::new(), SnapshotSource::Poll).with_sequence(1))
            .await
            .unwrap();
        updates.changed().await.unwrap();

        let state = updates.borrow_and_update().clone();
        assert_eq!(state.quotes().sequence, 1);
        assert!(state.updated_at().is_some());

        drop(tx);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_select_reports_stopped_loop() {
        let (handle, _tx) = start();

        handle.task.abort();
        while !handle.task.is_finished() {
            tokio::task::yield_now().await;
        }

        assert!(!handle.select(sym("HEI")).await);
        assert_eq!(handle.state().selected(), None);
    }
}
