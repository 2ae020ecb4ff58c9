//! Batch-level tallies.

use serde::Serialize;

use super::record::ClassificationRecord;

/// Counts derived from a list of records.
///
/// Only [`BatchSummary::from_records`] builds one, so the tallies always add up:
/// `valid + invalid == total` and `significant + insignificant == valid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_urls: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub significant_count: usize,
    pub insignificant_count: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ClassificationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total_urls += 1;
            if record.is_valid() {
                summary.valid_count += 1;
                if record.is_significant() {
                    summary.significant_count += 1;
                } else {
                    summary.insignificant_count += 1;
                }
            } else {
                summary.invalid_count += 1;
            }
            summary
        })
    }

    /// Records lacking significant content, invalid links included.
    pub fn without_significant_content(&self) -> usize {
        self.total_urls - self.significant_count
    }
}

/// Result of one batch: the summary plus every record in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub records: Vec<ClassificationRecord>,

    /// Inputs dropped by the batch cap.
    pub truncated: usize,

    /// True when cancellation stopped the batch before every URL was started.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn new(records: Vec<ClassificationRecord>, truncated: usize, cancelled: bool) -> Self {
        Self {
            summary: BatchSummary::from_records(&records),
            records,
            truncated,
            cancelled,
        }
    }
}
