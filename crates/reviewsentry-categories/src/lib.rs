//! ReviewSentry Categories
//!
//! The Classifier Definition Registry: an ordered, static catalogue of the
//! review-policy categories the oracle classifies against.
//!
//! Each definition bundles a display name, the oracle function identifier,
//! a one-line shape description, and a literal few-shot example block. The
//! catalogue is the system's extension point: a new policy category is one
//! new definition block, with no orchestrator changes.

pub mod catalogue;
pub mod definition;

pub use catalogue::{by_name, registry};
pub use definition::CategoryDefinition;
