//! Single URL classification.

use std::sync::Arc;

use tracing::{debug, warn, Instrument, Span};

use crate::content::main_content_text;
use crate::traits::fetcher::{FetchedPage, PageFetcher};
use crate::types::record::{ClassificationRecord, ContentSignificance};
use crate::url::normalize_url;

/// Only this status counts as a working link.
const VALID_STATUS: u16 = 200;

/// Fetches one URL and turns whatever happens into a [`ClassificationRecord`].
///
/// Log events are emitted inside the span handed to [`LinkClassifier::with_span`]
/// so callers decide where classification logs go.
#[derive(Clone)]
pub struct LinkClassifier {
    fetcher: Arc<dyn PageFetcher>,
    span: Span,
}

impl LinkClassifier {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            span: Span::none(),
        }
    }

    /// Emit classification events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn fetcher(&self) -> &Arc<dyn PageFetcher> {
        &self.fetcher
    }

    /// Normalize, fetch and classify `raw_url`.
    ///
    /// Never fails: transport errors become `FetchError` records.
    pub async fn classify(&self, raw_url: &str, min_chars: usize) -> ClassificationRecord {
        let url = normalize_url(raw_url);
        let parent = resolve_span(&self.span);
        let span = tracing::debug_span!(parent: &parent, "classify", url = %url);

        async {
            match self.fetcher.fetch(&url).await {
                Ok(page) => classify_page(&url, &page, min_chars),
                Err(e) => {
                    warn!(url = %url, error = %e, fetcher = self.fetcher.name(), "Error checking URL");
                    ClassificationRecord::fetch_error(&url, e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// The injected span, or the caller's current span when none was injected.
pub(crate) fn resolve_span(span: &Span) -> Span {
    if span.is_none() {
        Span::current()
    } else {
        span.clone()
    }
}

/// Decide the record for a page that did come back.
pub fn classify_page(url: &str, page: &FetchedPage, min_chars: usize) -> ClassificationRecord {
    if page.status != VALID_STATUS {
        debug!(url = %url, status = page.status, "Non-200 response");
        return ClassificationRecord::invalid_status(url, page.status);
    }

    let content = main_content_text(&page.body);
    let significance = content.significance(min_chars);

    debug!(
        url = %url,
        region = ?content.region,
        char_len = content.char_len(),
        min_chars = min_chars,
        significance = ?significance,
        "Content analysed"
    );

    ClassificationRecord::valid(url, significance == ContentSignificance::Significant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use crate::types::record::LinkOutcome;

    fn classifier(mock: &MockFetcher) -> LinkClassifier {
        LinkClassifier::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_bare_host_is_fetched_over_https() {
        let mock = MockFetcher::new().with_page("https://example.com", "<main>hi</main>");
        let record = classifier(&mock).classify("example.com", 0).await;

        assert_eq!(record.url(), "https://example.com");
        assert_eq!(mock.fetch_calls(), vec!["https://example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_prefixed_and_bare_forms_classify_the_same() {
        let mock = MockFetcher::new().with_page("https://example.com", "<main>hello</main>");
        let classifier = classifier(&mock);

        let bare = classifier.classify("example.com", 3).await;
        let prefixed = classifier.classify("https://example.com", 3).await;
        assert_eq!(bare, prefixed);
    }

    #[tokio::test]
    async fn test_threshold_boundary() {
        let mock = MockFetcher::new()
            .with_page("https://exact.example", format!("<main>{}</main>", "x".repeat(300)))
            .with_page("https://over.example", format!("<main>{}</main>", "x".repeat(301)));
        let classifier = classifier(&mock);

        let exact = classifier.classify("exact.example", 300).await;
        assert_eq!(exact.content(), ContentSignificance::Insignificant);

        let over = classifier.classify("over.example", 300).await;
        assert_eq!(over.content(), ContentSignificance::Significant);
    }

    #[tokio::test]
    async fn test_main_region_decides() {
        let html = format!(
            "<main>short</main><article>{}</article>",
            "long article text ".repeat(50)
        );
        let mock = MockFetcher::new().with_page("https://a.example", html);
        let record = classifier(&mock).classify("a.example", 300).await;

        assert!(record.is_valid());
        assert_eq!(record.content(), ContentSignificance::Insignificant);
    }

    #[tokio::test]
    async fn test_non_200_is_invalid_status() {
        let mock = MockFetcher::new()
            .with_status("https://missing.example", 404)
            .with_response("https://nocontent.example", 204, "");
        let classifier = classifier(&mock);

        let missing = classifier.classify("missing.example", 300).await;
        assert_eq!(missing.outcome(), &LinkOutcome::InvalidStatus { code: 404 });
        assert_eq!(missing.content(), ContentSignificance::NotApplicable);

        let no_content = classifier.classify("nocontent.example", 300).await;
        assert_eq!(no_content.outcome(), &LinkOutcome::InvalidStatus { code: 204 });
    }

    #[tokio::test]
    async fn test_error_page_body_is_not_analysed() {
        let body = format!("<main>{}</main>", "x".repeat(1000));
        let mock = MockFetcher::new().with_response("https://err.example", 500, body);
        let record = classifier(&mock).classify("err.example", 10).await;

        assert_eq!(record.content(), ContentSignificance::NotApplicable);
    }

    #[tokio::test]
    async fn test_transport_failures_become_records() {
        let mock = MockFetcher::new()
            .with_timeout("https://slow.example")
            .with_error("https://tls.example", "invalid peer certificate");
        let classifier = classifier(&mock);

        let slow = classifier.classify("slow.example", 300).await;
        assert!(matches!(slow.outcome(), LinkOutcome::FetchError { .. }));
        assert_eq!(slow.content(), ContentSignificance::NotApplicable);

        let tls = classifier.classify("tls.example", 300).await;
        assert!(tls
            .error_message()
            .unwrap()
            .contains("invalid peer certificate"));
    }

    #[test]
    fn test_classify_page_threshold_matches_content_rule() {
        for len in [0, 299, 300, 301] {
            let html = format!("<main>{}</main>", "a".repeat(len));
            let page = FetchedPage::new("https://t.example", 200, html.clone());

            let record = classify_page("https://t.example", &page, 300);
            assert_eq!(record.content(), main_content_text(&html).significance(300));
        }
    }

    #[test]
    fn test_classify_page_valid() {
        let page = FetchedPage::new("https://a.example", 200, "<article>Some words</article>");
        let record = classify_page("https://a.example", &page, 5);
        assert_eq!(record.content(), ContentSignificance::Significant);
    }
}
