//! Batch Link Checking Library
//!
//! Fetches a batch of URLs one after another and, for each, decides whether the
//! link is reachable (HTTP 200) and whether the page carries a meaningful amount
//! of readable text in its main content region.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use linkcheck::{BatchChecker, CheckConfig, HttpFetcher};
//!
//! let config = CheckConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let checker = BatchChecker::new(fetcher, config);
//!
//! let report = checker.check(&["example.com".to_string()], 300).await?;
//! println!("{} of {} links valid", report.summary.valid_count, report.summary.total_urls);
//! ```
//!
//! # Modules
//!
//! - [`url`] - URL normalization
//! - [`content`] - Main-content region selection and visible text extraction
//! - [`types`] - Records, summaries and configuration
//! - [`traits`] - The `PageFetcher` seam
//! - [`fetchers`] - reqwest-backed and mock fetchers
//! - [`classifier`] - Single URL classification
//! - [`batch`] - Capped, ordered batch classification
//! - [`report`] - JSON summary views and CSV export
//! - [`testing`] - HTML fixtures for tests

pub mod batch;
pub mod classifier;
pub mod content;
pub mod error;
pub mod fetchers;
pub mod report;
pub mod testing;
pub mod traits;
pub mod types;
pub mod url;

// Re-export core types at crate root
pub use batch::{split_urls, BatchChecker};
pub use classifier::LinkClassifier;
pub use content::{main_content_text, ContentRegion, ContentText};
pub use error::{CheckError, FetchError, ReportError};
pub use fetchers::{HttpFetcher, MockFetcher, MockResponse};
pub use report::{
    to_csv, to_legacy_csv, JsonReport, LegacyEnvelope, LegacySummary, SummaryView, CSV_FILENAME,
};
pub use traits::fetcher::{FetchedPage, PageFetcher};
pub use types::{
    config::{CheckConfig, DEFAULT_MAX_URLS, DEFAULT_MIN_CHARS, DEFAULT_USER_AGENT},
    record::{ClassificationRecord, ContentSignificance, LinkOutcome},
    summary::{BatchReport, BatchSummary},
};
pub use url::normalize_url;
