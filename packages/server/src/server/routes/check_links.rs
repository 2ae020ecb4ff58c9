//! `POST /check_links`: run a batch and render it in the negotiated format.

use axum::{
    extract::{rejection::FormRejection, Extension, Form},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use linkcheck::{
    split_urls, to_csv, BatchReport, CheckError, JsonReport, LegacyEnvelope, CSV_FILENAME,
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Form body posted by the index page (and by scripts).
#[derive(Debug, Default, Deserialize)]
pub struct CheckLinksForm {
    /// Whitespace-separated URLs
    #[serde(default)]
    pub urls: String,
    /// Significance threshold; blank means the configured default
    #[serde(default)]
    pub min_chars: Option<String>,
    /// `json`, `csv` or `legacy`; overrides the Accept header
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Csv,
    Legacy,
}

impl ResponseFormat {
    /// The explicit `format` field wins; otherwise `Accept: text/csv` picks CSV.
    pub fn negotiate(format: Option<&str>, headers: &HeaderMap) -> Result<Self, ApiError> {
        match format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(f) if f.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(f) if f.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(f) if f.eq_ignore_ascii_case("legacy") => Ok(Self::Legacy),
            Some(other) => Err(ApiError::InvalidInput(format!(
                "Unsupported format '{}'",
                other
            ))),
            None => {
                let wants_csv = headers
                    .get_all(header::ACCEPT)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .any(|value| value.to_ascii_lowercase().contains("text/csv"));

                Ok(if wants_csv { Self::Csv } else { Self::Json })
            }
        }
    }
}

/// Parse the optional threshold field, falling back to `default`.
pub fn parse_min_chars(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse::<usize>().map_err(|_| {
            ApiError::InvalidInput("min_chars must be a non-negative integer".to_string())
        }),
    }
}

pub async fn check_links_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    form: Result<Form<CheckLinksForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    let urls = split_urls(&form.urls);
    if urls.is_empty() {
        return Err(CheckError::empty_batch().into());
    }

    let min_chars = parse_min_chars(form.min_chars.as_deref(), state.config.min_chars)?;
    let format = ResponseFormat::negotiate(form.format.as_deref(), &headers)?;

    tracing::info!(
        urls = urls.len(),
        min_chars = min_chars,
        format = ?format,
        "Received link check request"
    );

    let report = run_batch(&state, &urls, min_chars).await?;

    match format {
        ResponseFormat::Json => Ok(Json(JsonReport::from(&report)).into_response()),
        ResponseFormat::Csv => csv_attachment(&report),
        ResponseFormat::Legacy => Ok(Json(LegacyEnvelope::from_report(&report)?).into_response()),
    }
}

/// Runs the batch, cancelling it if the configured deadline passes first.
async fn run_batch(
    state: &AppState,
    urls: &[String],
    min_chars: usize,
) -> Result<BatchReport, ApiError> {
    let Some(deadline) = state.config.batch_deadline else {
        return Ok(state.checker.check(urls, min_chars).await?);
    };

    let cancel = CancellationToken::new();
    let timer = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(deadline).await;
            tracing::warn!(deadline_secs = deadline.as_secs(), "Batch deadline reached");
            cancel.cancel();
        }
    });

    let result = state
        .checker
        .check_until_cancelled(urls, min_chars, &cancel)
        .await;
    timer.abort();

    Ok(result?)
}

fn csv_attachment(report: &BatchReport) -> Result<Response, ApiError> {
    let body = to_csv(report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
