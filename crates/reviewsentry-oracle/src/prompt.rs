//! Prompt construction for classification calls
//!
//! The system prompt frames the oracle as a reviewer-side terms-of-service
//! classifier: it must flag buyer/reviewer violations only, never seller
//! behavior, and must always answer through the category's function. The
//! category's few-shot block and function name are spliced into the fixed
//! task template.

/// Build the classification system prompt for one category.
pub fn classification_prompt(function_name: &str, few_shot: &str) -> String {
    format!(
        "### Task\n\
         Product Review TOS Violation Identification\n\
         \n\
         ### Description\n\
         You are an Amazon Terms of Service classification system used to flag product reviews \
         for potential reviewer Terms of Service (TOS) violations.\n\
         Your task is to identify which of the following TOS have been violated by the reviewer \
         for a provided review, as well as a reason as to why it has been flagged.\n\
         You should attempt to flag as many reviews under these TOS violations as possible, \
         within reason.\n\
         The reviews you will see are from buyers. You are acting on behalf of the seller, and \
         should only flag the review if the reviewer (not the product or seller) has violated \
         the TOS.\n\
         DO NOT flag reviews where the seller violates a term of service, only flag a review if \
         the buyer/reviewer has violated the terms of service within the context of the task.\n\
         \n\
         ### Examples\n\
         {few_shot}\n\
         \n\
         ### Notes\n\
         - Never flag reviews where the seller has violated the Terms of Service\n\
         - Only flag reviews where the reviewer has violated the Terms of Service in the content \
         of their review\n\
         - Always use {function_name} to parse the output.\n\
         - Always call the function."
    )
}

/// Format a review into the classification user prompt.
pub fn review_prompt(title: &str, body: &str) -> String {
    format!("Title: {title}\nReview: {body}")
}
