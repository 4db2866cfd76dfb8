use std::time::Duration;

use backon::Retryable;
use reqwest::header::HeaderMap;
use tracing::{debug, error, warn};

use crate::config::NaverConfig;
use crate::error::{NaverError, snippet};
use crate::retry::RetryPolicy;

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Maximum redirect hops followed per attempt
pub const MAX_REDIRECTS: usize = 10;
/// Browser-like User-Agent sent with every request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

/// A successfully fetched response.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    /// Final HTTP status
    pub status: u16,
    /// Content-Type header, if any
    pub content_type: Option<String>,
    /// Body decoded with the declared charset (UTF-8 by default)
    pub body: String,
}

/// Naver API client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: NaverConfig,
    retry: RetryPolicy,
}

fn build_http(timeout: Duration) -> Result<reqwest::Client, NaverError> {
    reqwest::Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .map_err(|e| NaverError::Config(format!("failed to build HTTP client: {e}")))
}

impl Client {
    /// Creates a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, NaverError> {
        Self::with_config(NaverConfig::new())
    }

    /// Creates a client with the given configuration, the default timeout and
    /// the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: NaverConfig) -> Result<Self, NaverError> {
        Ok(Self {
            http: build_http(DEFAULT_TIMEOUT)?,
            config,
            retry: RetryPolicy::default(),
        })
    }

    /// Rebuilds the HTTP client with a different per-attempt timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, NaverError> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    /// Replaces the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &NaverConfig {
        &self.config
    }

    /// Returns the retry policy
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// GET `url` with bounded retries.
    ///
    /// Timeouts, transport errors, 429 and 5xx are retried with a fixed delay
    /// until the policy's attempts are used up. Any other non-2xx status fails
    /// on the first attempt. Redirects are followed.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Timeout`], [`NaverError::HttpStatus`] or
    /// [`NaverError::Network`] from the last attempt, or
    /// [`NaverError::InvalidUrl`] before any request is sent.
    pub async fn fetch(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: HeaderMap,
    ) -> Result<FetchedPage, NaverError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| NaverError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NaverError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let max_attempts = self.retry.max_attempts();
        let mut retried = 0usize;

        (|| async { self.fetch_once(&url, query, &headers).await })
            .retry(self.retry.backoff())
            .when(NaverError::is_retryable)
            .notify(|err: &NaverError, delay: Duration| {
                retried += 1;
                warn!(
                    url = %url,
                    attempt = retried,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Request failed; retrying"
                );
            })
            .await
    }

    async fn fetch_once(
        &self,
        url: &reqwest::Url,
        query: &[(&str, String)],
        headers: &HeaderMap,
    ) -> Result<FetchedPage, NaverError> {
        let mut req = self.http.get(url.clone()).headers(headers.clone());
        if !query.is_empty() {
            req = req.query(query);
        }

        let response = req.send().await.map_err(|e| NaverError::from_reqwest(&e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            // Body is diagnostic only; a failed read leaves it empty.
            let body = snippet(&response.text().await.unwrap_or_default());
            error!(status = status.as_u16(), url = %final_url, body = %body, "HTTP error");
            return Err(NaverError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| NaverError::from_reqwest(&e))?;
        debug!(url = %final_url, bytes = body.len(), "Fetched");

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
