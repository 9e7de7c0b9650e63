//! Core types for ReviewSentry

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Position of the review id inside the source URL path.
///
/// Amazon review URLs carry the id as the fourth path segment, e.g.
/// `/product/gp/customer-reviews/R2XYZ.../ref=cm_cr`.
const REVIEW_ID_SEGMENT: usize = 3;

/// One row of the uploaded review report.
///
/// Field names map to the column headers of the input CSV. Reviews are
/// immutable once read; the orchestrator owns them for the run's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review title
    #[serde(rename = "Title")]
    pub title: String,

    /// Free-text review body
    #[serde(rename = "Body")]
    pub body: String,

    /// Reviewer handle
    #[serde(rename = "Author")]
    pub author: String,

    /// Product identifier (ASIN) the review was left under
    #[serde(rename = "Variation")]
    pub variation: String,

    /// Source URL the review was scraped from
    #[serde(rename = "URL")]
    pub url: String,
}

impl Review {
    /// Create a new review row
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        variation: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author: author.into(),
            variation: variation.into(),
            url: url.into(),
        }
    }

    /// Extract the review id from this review's source URL.
    pub fn review_id(&self) -> Result<String> {
        review_id_from_url(&self.url)
    }
}

/// Extract a review id from a source URL.
///
/// The id is the path segment at 0-indexed position 3. URLs with fewer
/// segments are rejected rather than silently yielding a wrong id.
pub fn review_id_from_url(raw: &str) -> Result<String> {
    let url =
        Url::parse(raw).map_err(|e| Error::ReviewUrl(format!("{}: {}", raw, e)))?;

    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.nth(REVIEW_ID_SEGMENT))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::ReviewUrl(format!(
                "{}: path has no segment at position {}",
                raw, REVIEW_ID_SEGMENT
            ))
        })?;

    Ok(segment.to_string())
}

/// Structured oracle verdict for one (review, category) pair.
///
/// This is the only output shape the oracle is permitted to answer with;
/// its derived JSON schema is handed to the model as function parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    /// Does this review violate the category's terms of service
    pub flagged: bool,

    /// Why was this review flagged as a violation for this category
    pub reason: String,
}

impl Verdict {
    /// A negative verdict with the standard no-violation reason
    pub fn clean() -> Self {
        Self {
            flagged: false,
            reason: "No violation detected.".to_string(),
        }
    }
}

/// Outcome of the shared post-flag sequence for a tentatively flagged review.
#[derive(Debug, Clone)]
pub enum FlagOutcome {
    /// Confirmation rejected the tentative flag; nothing was sent or recorded
    NoViolation,

    /// Confirmation accepted; a take-down notification was dispatched
    Violation {
        /// Display name of the violated category
        category: String,

        /// Rendered body of the notification email
        email_body: String,
    },
}

impl FlagOutcome {
    /// Whether this outcome represents an actionable violation
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }
}

/// One confirmed violation, destined for the output report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Review id extracted from the source URL
    pub review_id: String,

    /// Full review body text
    pub review: String,

    /// Display name of the violated category
    pub violation_category: String,

    /// Oracle's reason for the flag
    pub flagged_reason: String,

    /// Rendered body of the notification email that was sent
    pub email_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_id_from_url() {
        let id = review_id_from_url("https://www.amazon.com/a/b/c/R123/e").unwrap();
        assert_eq!(id, "R123");
    }

    #[test]
    fn test_review_id_from_real_shape() {
        let id = review_id_from_url(
            "https://www.amazon.com/product/gp/customer-reviews/R2ABCDEF123/ref=cm_cr",
        )
        .unwrap();
        assert_eq!(id, "R2ABCDEF123");
    }

    #[test]
    fn test_review_id_too_few_segments() {
        let err = review_id_from_url("https://www.amazon.com/a/b").unwrap_err();
        assert!(matches!(err, Error::ReviewUrl(_)));
    }

    #[test]
    fn test_review_id_unparseable_url() {
        let err = review_id_from_url("not a url").unwrap_err();
        assert!(matches!(err, Error::ReviewUrl(_)));
    }

    #[test]
    fn test_review_accessor() {
        let review = Review::new(
            "Great",
            "Loved it",
            "buyer-1",
            "B000123",
            "https://www.amazon.com/a/b/c/R9/e",
        );
        assert_eq!(review.review_id().unwrap(), "R9");
    }

    #[test]
    fn test_verdict_roundtrip() {
        let verdict: Verdict =
            serde_json::from_str(r#"{"flagged": true, "reason": "external link"}"#).unwrap();
        assert!(verdict.flagged);
        assert_eq!(verdict.reason, "external link");
    }

    #[test]
    fn test_flag_outcome() {
        assert!(!FlagOutcome::NoViolation.is_violation());
        assert!(FlagOutcome::Violation {
            category: "Hate speech".to_string(),
            email_body: "body".to_string(),
        }
        .is_violation());
    }
}
