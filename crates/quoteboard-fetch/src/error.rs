//! Fetch errors.

use quoteboard_types::{DataShapeError, QuoteboardError};
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server kept returning an error status after all retries.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The backend answered with an `{"error": ...}` body.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Response body was not valid JSON for the expected type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// History arrays could not be zipped into a series.
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    /// WebSocket transport failed.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A configured URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<FetchError> for QuoteboardError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Upstream(message) => Self::Upstream(message),
            FetchError::DataShape(e) => Self::DataShape(e),
            FetchError::Decode(e) => Self::Json(e),
            other => Self::Http(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_upstream_message() {
        let err = QuoteboardError::from(FetchError::Upstream("no data".to_string()));
        assert!(matches!(err, QuoteboardError::Upstream(ref m) if m == "no data"));
        assert_eq!(err.to_string(), "Upstream error: no data");
    }

    #[test]
    fn test_conversion_maps_shape_and_decode_errors() {
        let shape = DataShapeError::NonFinitePrice { index: 3 };
        let err = QuoteboardError::from(FetchError::DataShape(shape.clone()));
        assert!(matches!(err, QuoteboardError::DataShape(ref e) if *e == shape));

        let decode = serde_json::from_str::<u64>("nope").unwrap_err();
        let err = QuoteboardError::from(FetchError::Decode(decode));
        assert!(matches!(err, QuoteboardError::Json(_)));
    }

    #[test]
    fn test_transport_failures_become_http() {
        let err = QuoteboardError::from(FetchError::ServerError { status: 503 });
        assert!(matches!(err, QuoteboardError::Http(ref m) if m == "Server error: 503"));
    }
}
