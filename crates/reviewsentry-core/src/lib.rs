//! ReviewSentry Core
//!
//! Core types, error taxonomy, and utilities shared across ReviewSentry
//! components.
//!
//! This crate provides:
//! - Domain types for reviews, verdicts, and violation records
//! - Error types and result handling
//! - Review-id extraction from source URLs
//! - The shared exponential-backoff retry policy for outbound calls

pub mod error;
pub mod retry;
pub mod types;

pub use error::{Error, Result};
pub use retry::RetryPolicy;
pub use types::{review_id_from_url, FlagOutcome, Review, Verdict, ViolationRecord};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::retry::RetryPolicy;
    pub use crate::types::{FlagOutcome, Review, Verdict, ViolationRecord};
}
