//! HTTP client for the data.gov.sg real-time weather endpoints.
//!
//! Transient failures (transport errors, non-success HTTP statuses,
//! undecodable bodies) are retried with exponential backoff; an
//! application-level error code in the body is terminal for the call.
//! Every failure path resolves to `None` — callers degrade gracefully
//! and never see an error from this module.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::model::{Metric, SourceData, SourcePayload, WeatherSnapshot};

/// Base URL of the data.gov.sg v2 real-time weather API.
const DEFAULT_BASE_URL: &str = "https://api-open.data.gov.sg/v2/real-time/api";

/// Per-attempt request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Attempts per fetch before giving up.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Embedded status code that marks a payload as usable.
const API_SUCCESS_CODE: i64 = 0;

/// Upper bound on a single backoff sleep, so raising the retry count
/// cannot produce unbounded waits.
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Errors from a single fetch attempt. Internal to the retry loop;
/// they are logged and collapsed into `None` before reaching callers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered but flagged the payload as unusable.
    #[error("upstream returned error code {code}")]
    Api { code: i64, message: Option<String> },

    #[error("success code but payload carried no data")]
    EmptyPayload,
}

impl FetchError {
    /// An application-level error code is terminal for the current
    /// call; everything else is worth retrying.
    fn is_terminal(&self) -> bool {
        matches!(self, FetchError::Api { .. })
    }
}

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Maximum attempts per fetch.
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the three real-time weather endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl WeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_retries: config.max_retries,
        })
    }

    /// Fetch one metric, retrying transient failures.
    ///
    /// Returns `None` once retries are exhausted or the API flags the
    /// payload as unusable; the caller treats that as "source
    /// unavailable".
    pub async fn fetch(&self, metric: Metric) -> Option<SourceData> {
        info!("fetching {metric} data");
        let url = format!("{}{}", self.base_url, metric.path());
        fetch_with_retry(&url, self.max_retries, || self.request(&url)).await
    }

    /// Fetch all three sources concurrently.
    ///
    /// Each source runs as its own task with its own retry schedule; a
    /// source that fails (or whose task panics) becomes `None` for its
    /// slot without delaying or cancelling the others.
    pub async fn fetch_all(&self) -> WeatherSnapshot {
        info!("fetching all weather sources");

        let rainfall = self.spawn_fetch(Metric::Rainfall);
        let wind_speed = self.spawn_fetch(Metric::WindSpeed);
        let wind_direction = self.spawn_fetch(Metric::WindDirection);

        WeatherSnapshot {
            rainfall: join_source(rainfall).await,
            wind_speed: join_source(wind_speed).await,
            wind_direction: join_source(wind_direction).await,
        }
    }

    fn spawn_fetch(&self, metric: Metric) -> JoinHandle<Option<SourceData>> {
        let client = self.clone();
        tokio::spawn(async move { client.fetch(metric).await })
    }

    /// One attempt against one endpoint.
    async fn request(&self, url: &str) -> Result<SourceData, FetchError> {
        let res = self.http.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = res.text().await?;
        let payload: SourcePayload = serde_json::from_str(&body)?;

        if payload.code != API_SUCCESS_CODE {
            return Err(FetchError::Api {
                code: payload.code,
                message: payload.error_msg,
            });
        }

        payload.data.ok_or(FetchError::EmptyPayload)
    }
}

/// Drive `request` until it succeeds, a terminal error occurs, or
/// `max_retries` attempts are exhausted, sleeping `2^attempt` seconds
/// (capped) between attempts.
async fn fetch_with_retry<T, F, Fut>(url: &str, max_retries: u32, mut request: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    for attempt in 0..max_retries {
        match request().await {
            Ok(data) => return Some(data),
            Err(err) if err.is_terminal() => {
                error!(url, "upstream reported failure: {err}");
                return None;
            }
            Err(err) => {
                warn!(url, attempt = attempt + 1, "request failed: {err}");
            }
        }

        if attempt + 1 < max_retries {
            tokio::time::sleep(backoff_delay(attempt)).await;
        }
    }

    error!(url, max_retries, "giving up after exhausting retries");
    None
}

fn backoff_delay(attempt: u32) -> Duration {
    // 1, 2, 4, ... seconds, capped
    let secs = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_secs(secs).min(BACKOFF_CAP)
}

/// Await one source task, converting a panicked or cancelled task into
/// an absent source so the other slots stay usable.
async fn join_source<T>(handle: JoinHandle<Option<T>>) -> Option<T> {
    match handle.await {
        Ok(result) => result,
        Err(err) => {
            error!("weather fetch task failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn transient() -> FetchError {
        FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(10), BACKOFF_CAP);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_then_succeeds() {
        let attempts = Cell::new(0u32);
        let started = tokio::time::Instant::now();

        let result = fetch_with_retry("http://test", 3, || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move { if n < 3 { Err(transient()) } else { Ok(42) } }
        })
        .await;

        assert_eq!(result, Some(42));
        assert_eq!(attempts.get(), 3);
        // backoff of 1s + 2s before the third, successful attempt
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_return_none() {
        let attempts = Cell::new(0u32);

        let result: Option<i32> = fetch_with_retry("http://test", 3, || {
            attempts.set(attempts.get() + 1);
            async { Err(transient()) }
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test]
    async fn api_error_code_is_not_retried() {
        let attempts = Cell::new(0u32);

        let result: Option<i32> = fetch_with_retry("http://test", 3, || {
            attempts.set(attempts.get() + 1);
            async {
                Err(FetchError::Api {
                    code: 4,
                    message: Some("Invalid request".to_string()),
                })
            }
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test]
    async fn panicked_task_does_not_poison_other_sources() {
        let failing: JoinHandle<Option<i32>> =
            tokio::spawn(async { panic!("simulated source failure") });
        let healthy = tokio::spawn(async { Some(7) });

        assert_eq!(join_source(failing).await, None);
        assert_eq!(join_source(healthy).await, Some(7));
    }

    #[test]
    fn default_config_matches_upstream_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn config_with_base_url() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
