//! Single quote update channel merging the push feed with a poll backstop.

use futures::StreamExt;
use quoteboard_fetch::{FetchError, PushSource, QuoteSource, QuoteStream};
use quoteboard_types::{Quote, QuoteSnapshot, SnapshotSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Default time between backstop polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default push silence after which polling starts.
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay before reconnecting a dropped push feed.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Timing for the update channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Time between backstop polls while the push feed is silent.
    pub poll_interval: Duration,
    /// Push silence after which polling starts.
    pub push_timeout: Duration,
    /// Delay before retrying a failed or closed push connection.
    pub reconnect_delay: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            push_timeout: DEFAULT_PUSH_TIMEOUT,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

impl ChannelConfig {
    /// Sets the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the push silence timeout.
    #[must_use]
    pub const fn with_push_timeout(mut self, timeout: Duration) -> Self {
        self.push_timeout = timeout;
        self
    }

    /// Sets the reconnect delay.
    #[must_use]
    pub const fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Produces the dashboard's stream of quote snapshots.
///
/// The push feed is the primary path. One poll runs at startup; after that
/// the poll source is consulted only when the feed has been silent for longer
/// than [`ChannelConfig::push_timeout`], and then every
/// [`ChannelConfig::poll_interval`] until a push frame arrives again. Every
/// emitted snapshot carries a strictly increasing sequence number.
pub struct UpdateChannel {
    poll: Arc<dyn QuoteSource>,
    push: Option<Arc<dyn PushSource>>,
    config: ChannelConfig,
}

impl std::fmt::Debug for UpdateChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateChannel")
            .field("push", &self.push.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UpdateChannel {
    /// Creates a channel that only polls.
    #[must_use]
    pub fn polling(poll: Arc<dyn QuoteSource>) -> Self {
        Self {
            poll,
            push: None,
            config: ChannelConfig::default(),
        }
    }

    /// Adds a push feed as the primary source.
    #[must_use]
    pub fn with_push(mut self, push: Arc<dyn PushSource>) -> Self {
        self.push = Some(push);
        self
    }

    /// Sets the channel timing.
    #[must_use]
    pub const fn with_config(mut self, config: ChannelConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the channel timing.
    #[must_use]
    pub const fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Starts the channel on the current runtime.
    ///
    /// The task ends once the returned receiver is dropped.
    #[must_use]
    pub fn spawn(self, buffer: usize) -> mpsc::Receiver<QuoteSnapshot> {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        tokio::spawn(self.run(tx));
        rx
    }

    /// Runs until `tx` is closed.
    pub async fn run(self, tx: mpsc::Sender<QuoteSnapshot>) {
        let start = Instant::now();
        let mut sequence: u64 = 0;
        let mut stream: Option<QuoteStream> = None;
        let mut last_push = start;
        let mut last_poll: Option<Instant> = None;
        let mut reconnect_at = start;

        loop {
            let poll_at = self.next_poll(last_push, last_poll);

            tokio::select! {
                () = tx.closed() => {
                    debug!("update channel receiver dropped");
                    return;
                }
                frame = next_frame(&mut stream), if stream.is_some() => match frame {
                    Some(Ok(quotes)) => {
                        last_push = Instant::now();
                        sequence += 1;
                        if !emit(&tx, quotes, SnapshotSource::Push, sequence).await {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "quote feed failed");
                        stream = None;
                        reconnect_at = Instant::now() + self.config.reconnect_delay;
                    }
                    None => {
                        info!("quote feed closed");
                        stream = None;
                        reconnect_at = Instant::now() + self.config.reconnect_delay;
                    }
                },
                () = sleep_until(reconnect_at), if stream.is_none() && self.push.is_some() => {
                    if let Some(push) = &self.push {
                        match push.subscribe().await {
                            Ok(s) => stream = Some(s),
                            Err(e) => {
                                debug!(error = %e, "quote feed unavailable");
                                reconnect_at = Instant::now() + self.config.reconnect_delay;
                            }
                        }
                    }
                }
                () = sleep_until(poll_at) => {
                    last_poll = Some(Instant::now());
                    sequence += 1;
                    let issued = sequence;
                    match self.poll.quotes().await {
                        Ok(quotes) => {
                            if !emit(&tx, quotes, SnapshotSource::Poll, issued).await {
                                return;
                            }
                        }
                        Err(e) => warn!(error = %e, "quote poll failed"),
                    }
                }
            }
        }
    }

    /// Returns when the next backstop poll is due.
    fn next_poll(&self, last_push: Instant, last_poll: Option<Instant>) -> Instant {
        let Some(last_poll) = last_poll else {
            return Instant::now();
        };
        let by_interval = last_poll + self.config.poll_interval;
        if self.push.is_none() {
            return by_interval;
        }
        by_interval.max(last_push + self.config.push_timeout)
    }
}

async fn next_frame(stream: &mut Option<QuoteStream>) -> Option<Result<Vec<Quote>, FetchError>> {
    match stream {
        Some(s) => s.next().await,
        None => futures::future::pending().await,
    }
}

/// Sends one snapshot; returns false once the receiver is gone.
async fn emit(
    tx: &mpsc::Sender<QuoteSnapshot>,
    quotes: Vec<Quote>,
    source: SnapshotSource,
    sequence: u64,
) -> bool {
    debug!(%source, sequence, count = quotes.len(), "quote snapshot");
    let snapshot = QuoteSnapshot::new(quotes, source).with_sequence(sequence);
    tx.send(snapshot).await.is_ok()
}
