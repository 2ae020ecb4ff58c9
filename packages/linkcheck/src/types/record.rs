//! Per-URL classification records.

use serde::{Deserialize, Serialize};

/// What happened when a URL was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The final response (after redirects) was HTTP 200.
    Valid,

    /// A response arrived with any status other than 200.
    InvalidStatus { code: u16 },

    /// No usable response: DNS, connect, TLS, timeout or body read failure.
    FetchError { message: String },
}

/// Whether the page's main content region holds enough text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSignificance {
    Significant,
    Insignificant,
    /// The page was never analysed because the outcome was not `Valid`.
    NotApplicable,
}

impl ContentSignificance {
    /// Strict comparison: exactly `min_chars` characters is not enough.
    pub fn from_len(char_len: usize, min_chars: usize) -> Self {
        if char_len > min_chars {
            Self::Significant
        } else {
            Self::Insignificant
        }
    }
}

/// One classified URL.
///
/// Fields are private so the outcome/significance pairing can only be built
/// through the constructors below: `content` is `NotApplicable` exactly when
/// `outcome` is not `Valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    url: String,
    outcome: LinkOutcome,
    content: ContentSignificance,
}

impl ClassificationRecord {
    /// A reachable page. `significant` comes from the content heuristic.
    pub fn valid(url: impl Into<String>, significant: bool) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::Valid,
            content: if significant {
                ContentSignificance::Significant
            } else {
                ContentSignificance::Insignificant
            },
        }
    }

    pub fn invalid_status(url: impl Into<String>, code: u16) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::InvalidStatus { code },
            content: ContentSignificance::NotApplicable,
        }
    }

    pub fn fetch_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: LinkOutcome::FetchError {
                message: message.into(),
            },
            content: ContentSignificance::NotApplicable,
        }
    }

    /// The normalized URL that was fetched.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn outcome(&self) -> &LinkOutcome {
        &self.outcome
    }

    pub fn content(&self) -> ContentSignificance {
        self.content
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, LinkOutcome::Valid)
    }

    pub fn is_significant(&self) -> bool {
        self.content == ContentSignificance::Significant
    }

    /// HTTP status if one was received. Valid records always report 200.
    pub fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            LinkOutcome::Valid => Some(200),
            LinkOutcome::InvalidStatus { code } => Some(*code),
            LinkOutcome::FetchError { .. } => None,
        }
    }

    /// Status column text: the numeric code, or `Error` when nothing came back.
    pub fn status_label(&self) -> String {
        match self.status_code() {
            Some(code) => code.to_string(),
            None => "Error".to_string(),
        }
    }

    /// Content column text: `Yes`, `No` or `N/A`.
    pub fn content_label(&self) -> &'static str {
        match self.content {
            ContentSignificance::Significant => "Yes",
            ContentSignificance::Insignificant => "No",
            ContentSignificance::NotApplicable => "N/A",
        }
    }

    /// Error text for `FetchError` records.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            LinkOutcome::FetchError { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(
            ContentSignificance::from_len(300, 300),
            ContentSignificance::Insignificant
        );
        assert_eq!(
            ContentSignificance::from_len(301, 300),
            ContentSignificance::Significant
        );
        assert_eq!(
            ContentSignificance::from_len(0, 0),
            ContentSignificance::Insignificant
        );
    }

    #[test]
    fn test_constructors_pair_outcome_and_content() {
        let valid = ClassificationRecord::valid("https://a.example", true);
        assert!(valid.is_valid());
        assert_eq!(valid.content(), ContentSignificance::Significant);

        let thin = ClassificationRecord::valid("https://a.example", false);
        assert_eq!(thin.content(), ContentSignificance::Insignificant);

        let missing = ClassificationRecord::invalid_status("https://b.example", 404);
        assert!(!missing.is_valid());
        assert_eq!(missing.content(), ContentSignificance::NotApplicable);

        let broken = ClassificationRecord::fetch_error("https://c.example", "timed out");
        assert_eq!(broken.content(), ContentSignificance::NotApplicable);
        assert_eq!(broken.error_message(), Some("timed out"));
    }

    #[test]
    fn test_labels() {
        let valid = ClassificationRecord::valid("https://a.example", true);
        assert_eq!(valid.status_label(), "200");
        assert_eq!(valid.content_label(), "Yes");

        let missing = ClassificationRecord::invalid_status("https://b.example", 404);
        assert_eq!(missing.status_label(), "404");
        assert_eq!(missing.content_label(), "N/A");

        let broken = ClassificationRecord::fetch_error("https://c.example", "dns");
        assert_eq!(broken.status_label(), "Error");
        assert_eq!(broken.status_code(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let record = ClassificationRecord::invalid_status("https://b.example", 503);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["url"], "https://b.example");
        assert_eq!(json["outcome"]["kind"], "invalid_status");
        assert_eq!(json["outcome"]["code"], 503);
        assert_eq!(json["content"], "not_applicable");
    }
}
