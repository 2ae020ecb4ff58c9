//! Report rendering: JSON summary views and CSV export.

use serde::Serialize;

use crate::error::{ReportError, ReportResult};
use crate::types::record::ClassificationRecord;
use crate::types::summary::{BatchReport, BatchSummary};

/// Filename offered for the CSV attachment.
pub const CSV_FILENAME: &str = "links_analysis.csv";

const CSV_HEADER: [&str; 3] = ["URL", "Status", "Content"];

const LEGACY_CSV_HEADER: [&str; 7] = [
    "Total Links Analyzed",
    "Total Valid Links",
    "Total Invalid Links",
    "Total Links Without Significant Content",
    "URL",
    "Status Code",
    "Has Significant Content",
];

/// Summary counts as returned in JSON responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub total_urls: usize,
    pub valid_links: usize,
    pub invalid_links: usize,
    pub significant_content: usize,
    pub insignificant_content: usize,
}

impl From<&BatchSummary> for SummaryView {
    fn from(summary: &BatchSummary) -> Self {
        Self {
            total_urls: summary.total_urls,
            valid_links: summary.valid_count,
            invalid_links: summary.invalid_count,
            significant_content: summary.significant_count,
            insignificant_content: summary.insignificant_count,
        }
    }
}

/// Full JSON body: summary fields at the top level plus every record.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub summary: SummaryView,
    pub truncated_urls: usize,
    pub cancelled: bool,
    pub results: &'a [ClassificationRecord],
}

impl<'a> From<&'a BatchReport> for JsonReport<'a> {
    fn from(report: &'a BatchReport) -> Self {
        Self {
            summary: SummaryView::from(&report.summary),
            truncated_urls: report.truncated,
            cancelled: report.cancelled,
            results: &report.records,
        }
    }
}

/// Summary with the key names of the older combined-JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegacySummary {
    #[serde(rename = "Total Links Analyzed")]
    pub total_links: usize,
    #[serde(rename = "Total Valid Links")]
    pub valid_links: usize,
    #[serde(rename = "Total Invalid Links")]
    pub invalid_links: usize,
    /// Counts invalid links too, since they have no significant content.
    #[serde(rename = "Total Links Without Significant Content")]
    pub links_without_content: usize,
}

impl From<&BatchSummary> for LegacySummary {
    fn from(summary: &BatchSummary) -> Self {
        Self {
            total_links: summary.total_urls,
            valid_links: summary.valid_count,
            invalid_links: summary.invalid_count,
            links_without_content: summary.without_significant_content(),
        }
    }
}

/// Combined response: the summary and the CSV text in one JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyEnvelope {
    pub summary: LegacySummary,
    pub csv: String,
}

impl LegacyEnvelope {
    pub fn from_report(report: &BatchReport) -> ReportResult<Self> {
        Ok(Self {
            summary: LegacySummary::from(&report.summary),
            csv: to_legacy_csv(report)?,
        })
    }
}

/// One row per record: `URL,Status,Content`.
pub fn to_csv(report: &BatchReport) -> ReportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in &report.records {
        let status = record.status_label();
        writer.write_record([record.url(), status.as_str(), record.content_label()])?;
    }

    finish(writer)
}

/// Older layout: summary columns first, a synthetic summary row, then one row
/// per record with the summary columns left blank. Links that were not valid
/// report `No` for content.
pub fn to_legacy_csv(report: &BatchReport) -> ReportResult<String> {
    let summary = LegacySummary::from(&report.summary);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LEGACY_CSV_HEADER)?;

    let totals = [
        summary.total_links.to_string(),
        summary.valid_links.to_string(),
        summary.invalid_links.to_string(),
        summary.links_without_content.to_string(),
    ];
    writer.write_record([
        totals[0].as_str(),
        totals[1].as_str(),
        totals[2].as_str(),
        totals[3].as_str(),
        "",
        "",
        "",
    ])?;

    for record in &report.records {
        let status = record.status_label();
        let has_content = if record.is_significant() { "Yes" } else { "No" };
        writer.write_record(["", "", "", "", record.url(), status.as_str(), has_content])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> ReportResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Buffer(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BatchReport {
        BatchReport::new(
            vec![
                ClassificationRecord::valid("https://ok.example", true),
                ClassificationRecord::valid("https://thin.example", false),
                ClassificationRecord::invalid_status("https://gone.example", 404),
                ClassificationRecord::fetch_error("https://down.example", "connection refused"),
            ],
            0,
            false,
        )
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "URL,Status,Content",
                "https://ok.example,200,Yes",
                "https://thin.example,200,No",
                "https://gone.example,404,N/A",
                "https://down.example,Error,N/A",
            ]
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let report = BatchReport::new(
            vec![ClassificationRecord::invalid_status("https://a.example/?q=1,2", 500)],
            0,
            false,
        );
        let csv = to_csv(&report).unwrap();
        assert!(csv.contains("\"https://a.example/?q=1,2\",500,N/A"));
    }

    #[test]
    fn test_csv_header_only_for_empty_report() {
        let report = BatchReport::new(vec![], 0, true);
        let csv = to_csv(&report).unwrap();
        assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["URL,Status,Content"]);
    }

    #[test]
    fn test_legacy_csv_layout() {
        let csv = to_legacy_csv(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Total Links Analyzed,Total Valid Links,Total Invalid Links,\
             Total Links Without Significant Content,URL,Status Code,Has Significant Content"
        );
        assert_eq!(lines[1], "4,2,2,3,,,");
        assert_eq!(lines[2], ",,,,https://ok.example,200,Yes");
        assert_eq!(lines[4], ",,,,https://gone.example,404,No");
        assert_eq!(lines[5], ",,,,https://down.example,Error,No");
    }

    #[test]
    fn test_summary_view_json() {
        let report = sample_report();
        let json = serde_json::to_value(JsonReport::from(&report)).unwrap();

        assert_eq!(json["total_urls"], 4);
        assert_eq!(json["valid_links"], 2);
        assert_eq!(json["invalid_links"], 2);
        assert_eq!(json["significant_content"], 1);
        assert_eq!(json["insignificant_content"], 1);
        assert_eq!(json["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_legacy_envelope_json() {
        let envelope = LegacyEnvelope::from_report(&sample_report()).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["summary"]["Total Links Analyzed"], 4);
        assert_eq!(json["summary"]["Total Links Without Significant Content"], 3);
        assert!(json["csv"].as_str().unwrap().starts_with("Total Links Analyzed,"));
    }
}
