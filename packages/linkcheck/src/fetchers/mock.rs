//! Mock fetcher for testing.
//!
//! Provides canned responses per URL and records every fetch for assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{FetchedPage, PageFetcher};

/// Canned response for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Page { status: u16, body: String },
    /// A page that arrives after `delay`, yielding to the runtime meanwhile
    Delayed {
        delay: Duration,
        status: u16,
        body: String,
    },
    Timeout,
    ConnectError(String),
}

/// Mock fetcher for testing.
///
/// URLs without a canned response fail with a connection error, like an
/// unresolvable host would.
///
/// # Example
///
/// ```rust
/// use linkcheck::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.com", "<main>Hello</main>")
///     .with_status("https://example.com/missing", 404);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fetch_calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for `url`, replacing any previous one.
    pub fn add_response(&self, url: impl Into<String>, response: MockResponse) {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(url.into(), response);
        }
    }

    /// Respond to `url` with HTTP 200 and `body` (builder pattern).
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, 200, body)
    }

    /// Respond to `url` with `status` and an empty body (builder pattern).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.with_response(url, status, "")
    }

    /// Respond to `url` with `status` and `body` (builder pattern).
    pub fn with_response(
        self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.add_response(
            url,
            MockResponse::Page {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Respond to `url` with HTTP 200 after sleeping for `delay` (builder pattern).
    pub fn with_delayed_page(
        self,
        url: impl Into<String>,
        delay: Duration,
        body: impl Into<String>,
    ) -> Self {
        self.add_response(
            url,
            MockResponse::Delayed {
                delay,
                status: 200,
                body: body.into(),
            },
        );
        self
    }

    /// Make `url` time out (builder pattern).
    pub fn with_timeout(self, url: impl Into<String>) -> Self {
        self.add_response(url, MockResponse::Timeout);
        self
    }

    /// Make `url` fail to connect (builder pattern).
    pub fn with_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_response(url, MockResponse::ConnectError(message.into()));
        self
    }

    /// Get the URLs that were fetched, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Get the number of fetches made.
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.read().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Check if a URL was fetched.
    pub fn was_fetched(&self, url: &str) -> bool {
        self.fetch_calls
            .read()
            .map(|calls| calls.iter().any(|u| u == url))
            .unwrap_or(false)
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        if let Ok(mut calls) = self.fetch_calls.write() {
            calls.clear();
        }
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            fetch_calls: Arc::clone(&self.fetch_calls),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        if let Ok(mut calls) = self.fetch_calls.write() {
            calls.push(url.to_string());
        }

        let response = self
            .responses
            .read()
            .ok()
            .and_then(|responses| responses.get(url).cloned());

        match response {
            Some(MockResponse::Page { status, body }) => Ok(FetchedPage::new(url, status, body)),
            Some(MockResponse::Delayed {
                delay,
                status,
                body,
            }) => {
                tokio::time::sleep(delay).await;
                Ok(FetchedPage::new(url, status, body))
            }
            Some(MockResponse::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: Duration::from_secs(10),
            }),
            Some(MockResponse::ConnectError(message)) => Err(FetchError::Connect {
                url: url.to_string(),
                message,
            }),
            None => Err(FetchError::Connect {
                url: url.to_string(),
                message: "no mock response configured".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
