use crate::errors::FetchError;
use crate::retry::{RetryPolicy, RetryStep};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, instrument, warn};

/// HTTP client with per-request timeout, an overall deadline, a bound on
/// concurrent requests and policy-driven retry
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    deadline: Duration,
    limiter: Arc<Semaphore>,
}

impl HttpClient {
    pub fn new(
        timeout: Duration,
        deadline: Duration,
        max_concurrent_requests: usize,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            deadline,
            limiter: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        })
    }

    /// Fetch JSON from URL, retrying according to `policy`.
    ///
    /// The whole loop, permit waits and backoff sleeps included, runs under
    /// the client's deadline. Hitting the deadline ends the loop with a
    /// timeout error. A permit is held per attempt, never across a backoff.
    #[instrument(skip(self, policy), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str, policy: &RetryPolicy) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        tokio::time::timeout(self.deadline, self.get_json_with_retry(url, policy))
            .await
            .map_err(|_| {
                error!(url = %url, deadline_ms = self.deadline.as_millis(), "Request deadline exceeded");
                FetchError::timeout(format!("Request to {} exceeded its deadline", url))
            })?
    }

    async fn get_json_with_retry<T>(&self, url: &str, policy: &RetryPolicy) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 1;

        loop {
            let span = tracing::info_span!("http_request", attempt);

            match self.fetch_with_timeout(url).instrument(span).await {
                Ok(response) => {
                    info!(url = %url, attempt, "Request successful");
                    return Ok(response);
                }
                Err(e) => match policy.on_failure(attempt, &e) {
                    RetryStep::Backoff {
                        next_attempt,
                        delay,
                    } => {
                        warn!(
                            url = %url,
                            attempt,
                            backoff_ms = delay.as_millis(),
                            "Provider rate limited the request, retrying after backoff"
                        );
                        tokio::time::sleep(delay).await;
                        attempt = next_attempt;
                    }
                    RetryStep::GiveUp => {
                        error!(url = %url, attempt, error = %e, "Request failed");
                        return Err(e);
                    }
                },
            }
        }
    }

    async fn fetch_with_timeout<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|e| FetchError::client(format!("Rate limiter error: {}", e)))?;

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::timeout(format!("Request to {} timed out", url)))?
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::timeout(format!("Request to {} timed out", url))
                } else {
                    FetchError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status"),
            ));
        }

        let text = response.text().await.map_err(FetchError::Network)?;
        let json: T = serde_json::from_str(&text)?;

        Ok(json)
    }
}
