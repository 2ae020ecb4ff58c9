//! Batch classification: cap, classify in order, summarize.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument, Span};

use crate::classifier::{resolve_span, LinkClassifier};
use crate::error::{CheckError, CheckResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::CheckConfig;
use crate::types::summary::BatchReport;

/// Split a free-form submission into URL tokens on any whitespace.
pub fn split_urls(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Classifies a batch of URLs one after another.
///
/// Each fetch finishes (or times out) before the next one starts. A failing URL
/// never stops the batch; its failure is recorded and the loop moves on.
#[derive(Clone)]
pub struct BatchChecker {
    classifier: LinkClassifier,
    config: CheckConfig,
    span: Span,
}

impl BatchChecker {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: CheckConfig) -> Self {
        Self {
            classifier: LinkClassifier::new(fetcher),
            config,
            span: Span::none(),
        }
    }

    /// Emit batch and classification events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.classifier = self.classifier.with_span(span.clone());
        self.span = span;
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn classifier(&self) -> &LinkClassifier {
        &self.classifier
    }

    /// Classify the first `max_urls` entries of `raw_urls` in order.
    ///
    /// Fails only when `raw_urls` is empty; no fetch happens in that case.
    pub async fn check(&self, raw_urls: &[String], min_chars: usize) -> CheckResult<BatchReport> {
        self.run(raw_urls, min_chars, None).await
    }

    /// Like [`check`](Self::check), but stops starting new URLs once `cancel`
    /// fires. URLs never started are left out of the report rather than
    /// recorded as errors; a fetch already in flight runs to completion.
    pub async fn check_until_cancelled(
        &self,
        raw_urls: &[String],
        min_chars: usize,
        cancel: &CancellationToken,
    ) -> CheckResult<BatchReport> {
        self.run(raw_urls, min_chars, Some(cancel)).await
    }

    async fn run(
        &self,
        raw_urls: &[String],
        min_chars: usize,
        cancel: Option<&CancellationToken>,
    ) -> CheckResult<BatchReport> {
        if raw_urls.is_empty() {
            return Err(CheckError::empty_batch());
        }

        let limit = raw_urls.len().min(self.config.max_urls);
        let truncated = raw_urls.len() - limit;

        async {
            info!(
                received = raw_urls.len(),
                processing = limit,
                truncated = truncated,
                min_chars = min_chars,
                "Checking URLs"
            );

            let mut records = Vec::with_capacity(limit);
            let mut cancelled = false;

            for raw_url in &raw_urls[..limit] {
                if cancel.is_some_and(CancellationToken::is_cancelled) {
                    cancelled = true;
                    info!(
                        completed = records.len(),
                        skipped = limit - records.len(),
                        "Batch cancelled"
                    );
                    break;
                }

                let record = self.classifier.classify(raw_url, min_chars).await;
                debug!(
                    url = %record.url(),
                    status = %record.status_label(),
                    content = record.content_label(),
                    "URL classified"
                );
                records.push(record);
            }

            let report = BatchReport::new(records, truncated, cancelled);

            info!(
                total = report.summary.total_urls,
                valid = report.summary.valid_count,
                invalid = report.summary.invalid_count,
                significant = report.summary.significant_count,
                insignificant = report.summary.insignificant_count,
                "Batch complete"
            );

            Ok(report)
        }
        .instrument(resolve_span(&self.span))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::MockFetcher;
    use std::time::Duration;

    #[test]
    fn test_split_urls() {
        assert_eq!(
            split_urls("  a.example\nb.example\t\tc.example  "),
            vec!["a.example", "b.example", "c.example"]
        );
        assert!(split_urls(" \n\t ").is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected_without_fetching() {
        let mock = MockFetcher::new();
        let checker = BatchChecker::new(Arc::new(mock.clone()), CheckConfig::default());

        let err = checker.check(&[], 300).await.unwrap_err();
        assert!(matches!(err, CheckError::InvalidInput { .. }));
        assert_eq!(mock.fetch_call_count(), 0);
    }

    #[tokio::test]
    async fn test_cap_comes_from_config() {
        let mock = MockFetcher::new();
        let checker =
            BatchChecker::new(Arc::new(mock.clone()), CheckConfig::new().with_max_urls(2));
        let urls = split_urls("a.example b.example c.example");

        let report = checker.check(&urls, 300).await.unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.truncated, 1);
        assert_eq!(mock.fetch_call_count(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_omits_everything() {
        let mock = MockFetcher::new();
        let checker = BatchChecker::new(Arc::new(mock.clone()), CheckConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = checker
            .check_until_cancelled(&split_urls("a.example b.example"), 300, &cancel)
            .await
            .unwrap();

        assert!(report.cancelled);
        assert!(report.records.is_empty());
        assert_eq!(report.summary.total_urls, 0);
        assert_eq!(mock.fetch_call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_fetch_finishes_in_flight_url() {
        let mock = MockFetcher::new()
            .with_page("https://a.example", "<main>first</main>")
            .with_delayed_page(
                "https://b.example",
                Duration::from_millis(50),
                "<main>second</main>",
            )
            .with_page("https://c.example", "<main>third</main>");
        let checker = BatchChecker::new(Arc::new(mock.clone()), CheckConfig::default());
        let cancel = CancellationToken::new();

        // Cancel as soon as the second URL is in flight
        let watcher = tokio::spawn({
            let mock = mock.clone();
            let cancel = cancel.clone();
            async move {
                while !mock.was_fetched("https://b.example") {
                    tokio::task::yield_now().await;
                }
                cancel.cancel();
            }
        });

        let report = checker
            .check_until_cancelled(&split_urls("a.example b.example c.example"), 0, &cancel)
            .await
            .unwrap();
        watcher.await.unwrap();

        assert!(report.cancelled);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].url(), "https://b.example");
        assert!(report.records[1].is_valid());
        assert_eq!(report.summary.total_urls, 2);
        assert!(!mock.was_fetched("https://c.example"));
    }

    #[tokio::test]
    async fn test_uncancelled_token_runs_everything() {
        let mock = MockFetcher::new();
        let checker = BatchChecker::new(Arc::new(mock.clone()), CheckConfig::default());
        let cancel = CancellationToken::new();

        let report = checker
            .check_until_cancelled(&split_urls("a.example b.example"), 300, &cancel)
            .await
            .unwrap();

        assert!(!report.cancelled);
        assert_eq!(report.records.len(), 2);
    }
}
