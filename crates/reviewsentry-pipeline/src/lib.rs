//! ReviewSentry Pipeline
//!
//! The Pipeline Orchestrator: drives every uploaded review through every
//! category in the registry, cross-checks tentative flags with the
//! confirmation step, dispatches take-down notifications for confirmed
//! violations, and emits the aggregate CSV report at the end of the run.

pub mod confirmation;
pub mod orchestrator;
pub mod report;

pub use confirmation::confirm;
pub use orchestrator::Orchestrator;
pub use report::{read_reviews, read_violations, write_violations};
