//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{CheckError, CheckResult, FetchError, FetchResult};
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::types::config::CheckConfig;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Fetches pages over HTTP(S) with a browser-like User-Agent.
///
/// # Example
///
/// ```rust,ignore
/// use linkcheck::{CheckConfig, HttpFetcher, PageFetcher};
///
/// let fetcher = HttpFetcher::new(&CheckConfig::default())?;
/// let page = fetcher.fetch("https://example.com").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher using the timeout and User-Agent from `config`.
    pub fn new(config: &CheckConfig) -> CheckResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| CheckError::HttpClient(Box::new(e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Use a pre-built client. `timeout` is only used in error messages; the
    /// client is expected to enforce it.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if error.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                message: error_chain(&error),
            }
        } else if error.is_body() || error.is_decode() {
            FetchError::Body {
                url: url.to_string(),
                message: error_chain(&error),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                message: error_chain(&error),
            }
        }
    }
}

/// Error text including its sources; reqwest's own message alone rarely says
/// what went wrong.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            self.map_error(url, e)
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        // Error pages are never analysed, so a broken or stalled body must not
        // turn a received status into a fetch failure.
        if status != 200 {
            debug!(url = %url, final_url = %final_url, status = status, "Skipping body of non-200 response");
            return Ok(FetchedPage::new(url, status, String::new()).with_final_url(final_url));
        }

        let body = response.text().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read response body");
            self.map_error(url, e)
        })?;

        debug!(
            url = %url,
            final_url = %final_url,
            status = status,
            body_len = body.len(),
            "HTTP fetch completed"
        );

        Ok(FetchedPage::new(url, status, body).with_final_url(final_url))
    }

    fn name(&self) -> &str {
        "http"
    }
}
