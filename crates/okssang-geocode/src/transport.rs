//! HTTP transport with bounded retry on transient failures.
//!
//! [`HttpTransport::execute`] retries only idempotent methods, and only on a
//! configured set of transient statuses (429, 5xx) or connect/timeout
//! failures. Client errors and successfully parsed application payloads are
//! never retried here; classifying those is the provider's job.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};

use crate::diagnostics::ResponseDiagnostics;
use crate::error::TransportError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Process-wide retry settings, shared read-only by every request issued
/// through one transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 are treated as 1.
    pub total_attempts: u32,
    /// Base delay; the sleep before retry `n` is `backoff_ms * 2^(n-1)`.
    pub backoff_ms: u64,
    pub status_forcelist: Vec<u16>,
    pub allowed_methods: Vec<Method>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total_attempts: 3,
            backoff_ms: 500,
            status_forcelist: vec![429, 500, 502, 503, 504],
            allowed_methods: vec![Method::GET],
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_attempts(total_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            total_attempts,
            backoff_ms,
            ..Self::default()
        }
    }

    fn is_transient_status(&self, status: StatusCode) -> bool {
        self.status_forcelist.contains(&status.as_u16())
    }

    fn is_retriable_method(&self, method: &Method) -> bool {
        self.allowed_methods.contains(method)
    }

    /// Sleep before retry number `retry` (1-based).
    fn delay(&self, retry: u32) -> Duration {
        let computed = self
            .backoff_ms
            .saturating_mul(1u64 << retry.saturating_sub(1).min(16));
        Duration::from_millis(computed.min(MAX_DELAY_MS))
    }
}

/// `reqwest` errors worth another attempt: timeouts and connection failures
/// (refused, reset, DNS).
fn is_retriable(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Final URL after redirects.
    pub url: Url,
    pub content_type: Option<String>,
    pub body: String,
}

impl TransportResponse {
    /// Best-effort JSON parse of the body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    #[must_use]
    pub fn diagnostics(&self) -> ResponseDiagnostics {
        ResponseDiagnostics::new(
            self.status.as_u16(),
            &self.url,
            self.content_type.as_deref(),
            &self.body,
        )
    }
}

/// One outgoing request. The query is appended to `url` with proper encoding.
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub method: Method,
    pub url: &'a Url,
    pub query: &'a [(&'a str, &'a str)],
    pub headers: HeaderMap,
    pub timeout: Duration,
}

/// Pooled HTTP client plus the retry policy applied to every request.
///
/// `reqwest::Client` is internally reference counted and `Sync`, so a
/// transport can be cloned or shared across tasks.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    policy: RetryPolicy,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, policy: RetryPolicy) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, policy })
    }

    /// Builds the request URL with percent-encoded query parameters.
    #[must_use]
    pub fn build_url(base: &Url, query: &[(&str, &str)]) -> Url {
        let mut url = base.clone();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends `request`, retrying transient failures within the attempt budget.
    ///
    /// Non-transient statuses (including 4xx other than 429) are returned as
    /// `Ok` for the caller to classify.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Http`] on network failure, timeout, or body read
    ///   failure after the attempt budget is spent.
    /// - [`TransportError::RetriesExhausted`] if every attempt returned a
    ///   transient status.
    pub async fn execute(
        &self,
        request: &TransportRequest<'_>,
    ) -> Result<TransportResponse, TransportError> {
        let url = Self::build_url(request.url, request.query);
        let max_attempts = if self.policy.is_retriable_method(&request.method) {
            self.policy.total_attempts.max(1)
        } else {
            1
        };

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let result = self.send_once(&url, request).await;
            let retry_reason = match &result {
                Ok(response) if self.policy.is_transient_status(response.status) => {
                    Some(format!("HTTP {}", response.status.as_u16()))
                }
                Err(TransportError::Http(err)) if is_retriable(err) => Some(err.to_string()),
                _ => None,
            };
            let Some(retry_reason) = retry_reason else {
                return result;
            };

            if attempt >= max_attempts {
                return match result {
                    Ok(response) => Err(TransportError::RetriesExhausted {
                        status: response.status.as_u16(),
                        url: crate::diagnostics::redact_url(&response.url),
                        attempts: attempt,
                        diagnostics: Box::new(response.diagnostics()),
                    }),
                    Err(err) => Err(err),
                };
            }

            let delay = self.policy.delay(attempt);
            tracing::warn!(
                attempt,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                reason = %retry_reason,
                "transient HTTP failure, retrying after back-off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(
        &self,
        url: &Url,
        request: &TransportRequest<'_>,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Ok(TransportResponse {
            status,
            url: final_url,
            content_type,
            body,
        })
    }
}
