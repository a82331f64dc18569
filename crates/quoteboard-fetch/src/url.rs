//! Backend endpoint URL construction.
//!
//! The backend exposes:
//!
//! ```text
//! GET {base}/api/stocks
//! GET {base}/api/stock/{SYMBOL}/chart?period={lookback}
//! WS  {base}/ws
//! ```

use quoteboard_types::{Lookback, Symbol};

use crate::FetchError;

/// Returns the quote snapshot endpoint.
#[must_use]
pub fn quotes_url(base: &str) -> String {
    format!("{}/api/stocks", trim(base))
}

/// Returns the history endpoint for a symbol and lookback.
///
/// Symbols are validated on construction, so they are safe to embed in the
/// path without escaping.
#[must_use]
pub fn history_url(base: &str, symbol: &Symbol, lookback: Lookback) -> String {
    format!(
        "{}/api/stock/{}/chart?period={}",
        trim(base),
        symbol,
        lookback.as_str()
    )
}

/// Derives the WebSocket feed URL from an HTTP base URL.
///
/// `http` maps to `ws` and `https` to `wss`; `ws`/`wss` bases are kept.
///
/// # Errors
///
/// Returns an error if the base URL has any other scheme.
pub fn feed_url(base: &str) -> Result<String, FetchError> {
    let base = trim(base);
    let (scheme, rest) = base
        .split_once("://")
        .ok_or_else(|| FetchError::InvalidUrl(base.to_string()))?;

    let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(FetchError::InvalidUrl(base.to_string())),
    };

    Ok(format!("{ws_scheme}://{rest}/ws"))
}

fn trim(base: &str) -> &str {
    base.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_url() {
        assert_eq!(quotes_url("http://localhost:8000/"), "http://localhost:8000/api/stocks");
    }

    #[test]
    fn test_history_url() {
        let symbol = Symbol::new("mrcy").unwrap();
        assert_eq!(
            history_url("https://api.example.com", &symbol, Lookback::Month3),
            "https://api.example.com/api/stock/MRCY/chart?period=3mo"
        );
    }

    #[test]
    fn test_feed_url() {
        assert_eq!(feed_url("http://localhost:8000").unwrap(), "ws://localhost:8000/ws");
        assert_eq!(feed_url("https://api.example.com/").unwrap(), "wss://api.example.com/ws");
        assert!(matches!(feed_url("localhost:8000"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(feed_url("ftp://host"), Err(FetchError::InvalidUrl(_))));
    }
}
