//! Take-down notification templates
//!
//! Subjects and bodies are deterministic functions of the violation: same
//! review, same category, same rendered text.

/// Compose the take-down request subject line.
pub fn compose_subject(category: &str, product_id: &str) -> String {
    format!(
        "Request for Review Removal - ASIN: {product_id} - Violated Policy: {category}"
    )
}

/// Compose the take-down request body.
///
/// Identifies the review by product, reviewer, and id, quotes its text,
/// states the flag reason, and asks for removal.
pub fn compose_body(
    product_id: &str,
    reviewer: &str,
    review_text: &str,
    review_id: &str,
    flag_reason: &str,
    sender_name: &str,
) -> String {
    format!(
        "Dear Community Help,\n\
         \n\
         I am reaching out to you today concerning a product review that may breach Amazon's \
         Customer Review Policy.\n\
         \n\
         The review in question can be located under ASIN: {product_id}, and it was posted by a \
         user with the username {reviewer}.\n\
         \n\
         Here's the content of the review:\n\
         \n\
         Review ID: {review_id}\n\
         Review: \"{review_text}\"\n\
         \n\
         Upon careful examination, this review infringes upon your review policies for the \
         reasons listed below:\n\
         \n\
         {flag_reason}\n\
         \n\
         I would like to request your assistance in reviewing this case and, if appropriate, \
         removing the review to maintain a fair and unbiased review environment for our \
         customers.\n\
         \n\
         We place immense value on the authenticity of customer feedback and fully comprehend \
         the significance of sincere reviews for our enterprise and prospective customers. \
         While we have no intention of suppressing negative feedback, we firmly stand by the \
         notion that all reviews should strictly conform to Amazon's established policies.\n\
         \n\
         I appreciate your attention to this matter.\n\
         \n\
         Best regards,\n\
         \n\
         {sender_name}"
    )
}

/// Body used for the end-of-run report email.
pub fn report_body() -> &'static str {
    "Find your attached CSV below."
}

/// Subject used for the end-of-run report email.
pub fn report_subject(filename: &str) -> String {
    format!("File: {filename}")
}
