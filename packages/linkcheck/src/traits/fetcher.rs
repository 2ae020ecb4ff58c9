//! Page fetching seam.
//!
//! The classifier only needs "GET this URL, tell me the status and body".
//! Production uses [`HttpFetcher`](crate::fetchers::HttpFetcher); tests swap
//! in [`MockFetcher`](crate::fetchers::MockFetcher) so no network is touched.

use async_trait::async_trait;

use crate::error::FetchResult;

/// A response as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// URL after following redirects
    pub final_url: String,

    /// Status of the final response
    pub status: u16,

    /// Decoded response body
    pub body: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            status,
            body: body.into(),
        }
    }

    /// Set the post-redirect URL.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    pub fn redirected(&self) -> bool {
        self.url != self.final_url
    }
}

/// Fetches a single page.
///
/// Implementations must follow redirects and bound every call by a timeout.
/// Any response, whatever its status, is `Ok`; only transport failures are
/// `Err`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}
