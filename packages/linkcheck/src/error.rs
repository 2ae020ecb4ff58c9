//! Typed errors for the link checking library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the HTTP boundary can
//! map each variant onto a response status.

use std::time::Duration;

use thiserror::Error;

/// Errors that abort a whole batch.
///
/// Per-URL failures never show up here; they are recorded on the
/// [`ClassificationRecord`](crate::types::record::ClassificationRecord) instead.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The batch was structurally unusable (e.g. no URLs)
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CheckError {
    pub fn empty_batch() -> Self {
        Self::InvalidInput {
            reason: "No URLs provided".to_string(),
        }
    }
}

/// Errors that can occur while fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response within the configured timeout
    #[error("timed out after {}s fetching {url}", timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    /// DNS failure, refused connection, TLS handshake failure
    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    /// Any other request-level failure (bad URL, redirect loop, ...)
    #[error("request failed for {url}: {message}")]
    Request { url: String, message: String },

    /// The response body could not be read
    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Errors raised while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendered bytes were not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The CSV writer could not hand back its buffer
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Result type alias for batch operations.
pub type CheckResult<T> = std::result::Result<T, CheckError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for report rendering.
pub type ReportResult<T> = std::result::Result<T, ReportError>;
