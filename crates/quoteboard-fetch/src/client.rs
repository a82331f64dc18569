//! HTTP client for quote snapshots and price history.

use quoteboard_types::{HistoryPayload, Lookback, Quote, Series, Symbol};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{FetchError, url};

/// Backend address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // Quote snapshots hit a slow upstream once per ticker
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            user_agent: format!("quoteboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Sets the backend base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the full quote snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the body
    /// is not a list of quotes.
    pub async fn quotes(&self) -> Result<Vec<Quote>, FetchError> {
        let quotes: Vec<Quote> = self.get_json(&url::quotes_url(&self.config.base_url)).await?;
        debug!(count = quotes.len(), "fetched quote snapshot");
        Ok(quotes)
    }

    /// Fetches the raw history payload for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Upstream`] if the backend answered with an
    /// error body, or another error if the request or decoding fails.
    pub async fn history_payload(
        &self,
        symbol: &Symbol,
        lookback: Lookback,
    ) -> Result<HistoryPayload, FetchError> {
        let body: serde_json::Value = self
            .get_json(&url::history_url(&self.config.base_url, symbol, lookback))
            .await?;

        // The backend reports failures as 200 with {"error": "..."}
        if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(FetchError::Upstream(message.to_string()));
        }

        Ok(serde_json::from_value(body)?)
    }

    /// Fetches and validates the history series for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the payload arrays differ in
    /// length.
    pub async fn history(&self, symbol: &Symbol, lookback: Lookback) -> Result<Series, FetchError> {
        let payload = self.history_payload(symbol, lookback).await?;
        let series = Series::from_payload(symbol.clone(), &payload)?;
        debug!(%symbol, %lookback, len = series.len(), "fetched history");
        Ok(series)
    }

    /// Issues a GET and decodes the JSON body, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut attempts = 0;

        loop {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    // Retry on server errors (5xx) and rate limiting (429)
                    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            warn!(%url, status = status.as_u16(), attempt = attempts, ?delay, "retrying request");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(FetchError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    let bytes = response.bytes().await?;
                    return Ok(serde_json::from_slice(&bytes)?);
                }
                Err(e) if self.is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(%url, error = %e, attempt = attempts, ?delay, "retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter of up to +25%, varying with the attempt number
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            (u64::from(attempt) * 17) % jitter_range
        } else {
            0
        };

        Duration::from_millis((capped_delay + jitter).max(10))
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(&self, error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }

        error.is_timeout() || error.is_connect() || error.is_request()
    }
}
