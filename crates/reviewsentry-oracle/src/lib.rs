//! ReviewSentry Oracle
//!
//! The Classification Oracle Adapter: wraps OpenAI chat completions behind
//! the [`Oracle`] trait so the pipeline can classify reviews into a fixed
//! structured-output shape and run free-text confirmation calls.
//!
//! Classification requests pin the function call to the category's shape
//! and parse fail-closed; all outbound calls retry with exponential backoff
//! before surfacing an oracle error.

pub mod openai;
pub mod oracle;
pub mod prompt;
pub mod schema;

pub use openai::OpenAiOracle;
pub use oracle::{Oracle, OutputShape};
pub use prompt::{classification_prompt, review_prompt};
pub use schema::verdict_parameters;
