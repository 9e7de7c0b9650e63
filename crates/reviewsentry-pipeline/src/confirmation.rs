//! Violation confirmation step
//!
//! A tentative flag is most often wrong in one specific way: the review
//! describes seller, order, or shipping problems rather than a reviewer-side
//! policy breach. Before any notification goes out, a second oracle call
//! judges whether the review and the flag reason actually align. Only a
//! non-empty, non-"False" answer turns the tentative flag into an
//! actionable violation; anything else drops it silently.

use reviewsentry_core::{Result, Review};
use reviewsentry_oracle::Oracle;
use tracing::debug;

/// System prompt for the alignment check.
const CONFIRMATION_PROMPT: &str = "### Task\n\
Amazon Product Review ToS Violation Classification and Segmentation\n\
\n\
### Description\n\
You are an Amazon terms of service classification model. You will be given a review and the \
reason that it has been flagged for violating Amazons reviews terms of service. You are going \
to check if the review and the reason for it being flagged are in alignment.\n\
You will ensure that the flagged reason discusses buyer side review violations and never \
seller based violations.\n\
\n\
### Examples\n\
Review: Check out my blog post with detailed pictures and a review of this product: www.exampleblog.com/myproductreview\n\
Flagged Reason: User included an external link.\n\
Answer: True\n\
\n\
Review: I ordered this product a month ago, and it still hasn't arrived! The seller is unresponsive and doesn't care about their customers.\n\
Flagged Reason: User used repetitive symbols and excessive stars.\n\
Answer: False\n\
\n\
### Notes\n\
- If the review and flagged reason do not align, you will return \"False\".\n\
- If the review and flagged reason do align but the review discusses the behaviour of the \
seller, you will return \"False\"\n\
\n\
Otherwise, you will always return \"True\"";

/// Format the confirmation user prompt for a tentative flag.
fn confirmation_input(review_body: &str, reason: &str) -> String {
    format!("Review: {review_body}\nFlagged Reason: {reason}")
}

/// Interpret the oracle's free-text answer as confirmation evidence.
///
/// Empty or whitespace-only output rejects, as does an answer that reads
/// false once quotes are stripped.
fn is_confirmed(response: &str) -> bool {
    let answer = response.trim().trim_matches('"');
    !answer.is_empty() && !answer.eq_ignore_ascii_case("false")
}

/// Cross-check a tentative flag against its stated reason.
pub async fn confirm(oracle: &dyn Oracle, review: &Review, reason: &str) -> Result<bool> {
    let input = confirmation_input(&review.body, reason);
    let response = oracle.complete(CONFIRMATION_PROMPT, &input).await?;

    let confirmed = is_confirmed(&response);
    debug!(confirmed, response = %response.trim(), "confirmation verdict");
    Ok(confirmed)
}
