//! Configuration for batch link checks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default significance threshold, in characters of main-content text.
pub const DEFAULT_MIN_CHARS: usize = 300;

/// Only this many URLs of a batch are processed; the rest are dropped.
pub const DEFAULT_MAX_URLS: usize = 100;

/// Per-URL fetch timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like User-Agent to avoid trivial bot blocking.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Configuration for a [`BatchChecker`](crate::batch::BatchChecker) and the
/// [`HttpFetcher`](crate::fetchers::HttpFetcher) behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Threshold used when the caller does not supply one.
    ///
    /// A page is significant when its main-content text is strictly longer.
    /// Default: 300.
    pub min_chars: usize,

    /// Maximum URLs processed per batch. Default: 100.
    pub max_urls: usize,

    /// Per-URL timeout covering connect, redirects and body. Default: 10s.
    pub timeout: Duration,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_urls: DEFAULT_MAX_URLS,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CheckConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default significance threshold.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Set the batch cap.
    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    /// Set the per-URL timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
