//! HTTP transport with bounded retry, shared throttle back-off and
//! cancellation.
//!
//! Transient server errors (500/502/503/504) and connection failures are
//! retried with exponential back-off. A 429 closes a [`ThrottleGate`] shared
//! by every worker using the transport, so the whole pool slows down rather
//! than each worker hammering the endpoint on its own. Throttle waits are
//! capped per request; running out of them yields
//! [`FetchError::Throttled`], which callers treat as an open circuit.

use std::sync::Arc;

use rand::Rng;
use reqwest::header::RETRY_AFTER;
use reqwest::{Request, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;

/// Server errors worth retrying.
pub const TRANSIENT_STATUSES: [u16; 4] = [500, 502, 503, 504];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry and pacing knobs, loadable from the `[retry]` settings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries for transient errors before giving up.
    pub max_retries: u32,
    /// First back-off delay; doubles on each retry.
    pub backoff_base_ms: u64,
    /// Upper bound for a single back-off delay.
    pub max_backoff_ms: u64,
    /// Pause after a 429 without a usable `Retry-After` header.
    pub throttle_wait_ms: u64,
    /// Throttle waits allowed for one request before the circuit opens.
    pub max_throttle_retries: u32,
    /// Random extra delay added to every wait, up to this many ms.
    pub jitter_ms: u64,
    /// Minimum spacing between consecutive requests on this transport.
    pub min_request_interval_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            backoff_base_ms: 1_000,
            max_backoff_ms: 60_000,
            throttle_wait_ms: 5_000,
            max_throttle_retries: 60,
            jitter_ms: 500,
            min_request_interval_ms: 0,
        }
    }
}

impl RetryPolicy {
    /// Back-off before retry number `attempt` (0-based), without jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let ms = self.backoff_base_ms.saturating_mul(factor).min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }

    pub fn throttle_wait(&self) -> Duration {
        Duration::from_millis(self.throttle_wait_ms)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    fn jitter(&self) -> Duration {
        if self.jitter_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=self.jitter_ms))
    }
}

/// How a response status is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Throttled,
    Transient,
    Fatal,
}

pub fn classify_status(status: StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        StatusClass::Throttled
    } else if TRANSIENT_STATUSES.contains(&status.as_u16()) {
        StatusClass::Transient
    } else {
        StatusClass::Fatal
    }
}

/// Shared pause point for every worker using one transport.
#[derive(Debug, Clone, Default)]
pub struct ThrottleGate {
    resume_at: Arc<Mutex<Option<Instant>>>,
}

impl ThrottleGate {
    /// Keep the gate closed for at least `wait` from now.
    pub async fn close_for(&self, wait: Duration) {
        let until = Instant::now() + wait;
        let mut resume_at = self.resume_at.lock().await;
        if resume_at.is_none_or(|current| until > current) {
            *resume_at = Some(until);
        }
    }

    /// Wait until the gate reopens, or fail if `cancel` fires first.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), FetchError> {
        let until = *self.resume_at.lock().await;
        match until {
            Some(until) if until > Instant::now() => {
                tokio::select! {
                    _ = tokio::time::sleep_until(until) => Ok(()),
                    _ = cancel.cancelled() => Err(FetchError::Cancelled),
                }
            }
            _ => Ok(()),
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.resume_at
            .lock()
            .await
            .is_some_and(|until| until > Instant::now())
    }
}

/// Retrying wrapper around a `reqwest::Client`.
pub struct RetryingTransport {
    http: reqwest::Client,
    policy: RetryPolicy,
    gate: ThrottleGate,
    cancel: CancellationToken,
    /// `None` until the first request goes out.
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RetryingTransport {
    pub fn new(policy: RetryPolicy, cancel: CancellationToken) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("steamdex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            policy,
            gate: ThrottleGate::default(),
            cancel,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn gate(&self) -> &ThrottleGate {
        &self.gate
    }

    /// GET `url` with `query` and return the body as text.
    pub async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let request = self.http.get(url).query(query).build()?;
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    /// Send `request`, retrying per the policy.
    pub async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let url = redact(request.url());
        let mut transient_attempts: u32 = 0;
        let mut throttle_attempts: u32 = 0;

        loop {
            self.gate.wait(&self.cancel).await?;
            self.rate_limit().await?;

            let attempt = request.try_clone().ok_or_else(|| {
                FetchError::Config(format!("request to {url} cannot be retried"))
            })?;

            let result = tokio::select! {
                r = self.http.execute(attempt) => r,
                _ = self.cancel.cancelled() => return Err(FetchError::Cancelled),
            };

            let failed_status = match result {
                Ok(response) => match classify_status(response.status()) {
                    StatusClass::Success => return Ok(response),
                    StatusClass::Throttled => {
                        throttle_attempts += 1;
                        if throttle_attempts > self.policy.max_throttle_retries {
                            return Err(FetchError::Throttled {
                                url,
                                attempts: throttle_attempts - 1,
                            });
                        }
                        let wait = retry_after(&response).unwrap_or_else(|| self.policy.throttle_wait())
                            + self.policy.jitter();
                        log::warn!(
                            "Throttled by {} (wait {} of {}), pausing {:.1}s",
                            url,
                            throttle_attempts,
                            self.policy.max_throttle_retries,
                            wait.as_secs_f64(),
                        );
                        self.gate.close_for(wait).await;
                        continue;
                    }
                    StatusClass::Transient => Some(response.status().as_u16()),
                    StatusClass::Fatal => {
                        return Err(FetchError::Status {
                            status: response.status().as_u16(),
                            url,
                        });
                    }
                },
                Err(e) if is_retryable_error(&e) => {
                    if transient_attempts >= self.policy.max_retries {
                        return Err(e.into());
                    }
                    log::debug!("{} failed ({}), retrying", url, e);
                    None
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(status) = failed_status {
                if transient_attempts >= self.policy.max_retries {
                    return Err(FetchError::RetriesExhausted {
                        status,
                        url,
                        attempts: transient_attempts + 1,
                    });
                }
            }

            let delay = self.policy.backoff_delay(transient_attempts) + self.policy.jitter();
            transient_attempts += 1;
            log::debug!(
                "Retry {}/{} for {} in {:.1}s",
                transient_attempts,
                self.policy.max_retries,
                url,
                delay.as_secs_f64(),
            );
            self.sleep(delay).await?;
        }
    }

    /// Enforce the minimum spacing between requests.
    async fn rate_limit(&self) -> Result<(), FetchError> {
        let min_interval = self.policy.min_request_interval();
        if min_interval.is_zero() {
            return Ok(());
        }
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < min_interval {
                self.sleep(min_interval - elapsed).await?;
            }
        }
        *last = Some(Instant::now());
        Ok(())
    }

    async fn sleep(&self, delay: Duration) -> Result<(), FetchError> {
        tokio::select! {
            _ = tokio::time::sleep(delay) => Ok(()),
            _ = self.cancel.cancelled() => Err(FetchError::Cancelled),
        }
    }
}

fn is_retryable_error(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect()
}

/// Seconds from a numeric `Retry-After` header.
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// URL without its query string, which carries the API key.
pub fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
