//! WebSocket push feed of quote snapshots.

use futures::future;
use futures::stream::{BoxStream, StreamExt};
use quoteboard_types::Quote;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use crate::{FetchError, url};

/// Stream of full quote snapshots from the push feed.
///
/// The stream ends when the server closes the connection. Transport errors
/// are yielded once and the stream ends after them.
pub type QuoteStream = BoxStream<'static, Result<Vec<Quote>, FetchError>>;

/// WebSocket client for the backend's `/ws` endpoint.
///
/// Every text frame carries the complete quote list; there are no deltas.
#[derive(Debug, Clone)]
pub struct QuoteFeed {
    url: String,
}

impl QuoteFeed {
    /// Creates a feed for an explicit WebSocket URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Creates a feed from the backend's HTTP base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL scheme is not HTTP(S) or WS(S).
    pub fn from_base_url(base: &str) -> Result<Self, FetchError> {
        Ok(Self::new(url::feed_url(base)?))
    }

    /// Returns the WebSocket URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connects and returns the stream of snapshots.
    ///
    /// Frames that are not valid quote lists are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the WebSocket handshake fails.
    pub async fn subscribe(&self) -> Result<QuoteStream, FetchError> {
        let (ws, _) = connect_async(self.url.as_str()).await?;
        info!(url = %self.url, "quote feed connected");

        let mut failed = false;
        let frames = ws
            .take_while(move |frame| {
                let keep = !failed && !matches!(frame, Ok(Message::Close(_)));
                failed = frame.is_err();
                future::ready(keep)
            })
            .filter_map(|frame| {
                future::ready(match frame {
                    Ok(Message::Text(text)) => decode_frame(&text).map(Ok),
                    Ok(Message::Binary(bytes)) => std::str::from_utf8(&bytes)
                        .ok()
                        .and_then(decode_frame)
                        .map(Ok),
                    Ok(_) => None,
                    Err(e) => Some(Err(FetchError::from(e))),
                })
            });

        Ok(frames.boxed())
    }
}

/// Parses one snapshot frame, logging and dropping malformed ones.
fn decode_frame(text: &str) -> Option<Vec<Quote>> {
    match serde_json::from_str(text) {
        Ok(quotes) => Some(quotes),
        Err(e) => {
            warn!(error = %e, "skipping malformed quote frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    const FRAME: &str = r#"[{"symbol":"RCAT","currentValue":3.1,"previousClose":3.0,
        "change":0.1,"changePct":3.33,"volume":5000,"marketCap":250000000,
        "peRatio":0,"eps":-0.4}]"#;

    /// Serves one connection that sends the given frames and then closes.
    async fn serve(frames: Vec<Message>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            for frame in frames {
                ws.send(frame).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });
        format!("ws://{addr}/ws")
    }

    #[tokio::test]
    async fn test_subscribe_yields_snapshots_and_skips_garbage() {
        let url = serve(vec![
            Message::Text(FRAME.to_string()),
            Message::Text("not json".to_string()),
            Message::Text(FRAME.to_string()),
        ])
        .await;

        let feed = QuoteFeed::new(url);
        let snapshots: Vec<_> = feed.subscribe().await.unwrap().collect().await;

        assert_eq!(snapshots.len(), 2);
        let first = snapshots[0].as_ref().unwrap();
        assert_eq!(first[0].symbol.as_str(), "RCAT");
        assert_eq!(first[0].market_cap, 250_000_000);
    }

    #[tokio::test]
    async fn test_subscribe_fails_without_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let feed = QuoteFeed::new(format!("ws://{addr}/ws"));
        assert!(matches!(feed.subscribe().await, Err(FetchError::WebSocket(_))));
    }

    #[test]
    fn test_from_base_url() {
        let feed = QuoteFeed::from_base_url("http://localhost:8000").unwrap();
        assert_eq!(feed.url(), "ws://localhost:8000/ws");
    }
}
