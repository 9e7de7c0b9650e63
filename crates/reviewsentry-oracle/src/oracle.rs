//! Oracle trait and output-shape descriptor

use crate::schema::verdict_parameters;
use async_trait::async_trait;
use reviewsentry_core::{Result, Verdict};

/// The structured-output shape a classification call must answer with.
///
/// Every category shares the verdict field layout (`flagged`, `reason`); a
/// shape differs only in the function name the model is forced to call and
/// the description steering what that function detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputShape {
    /// Function identifier the model must select
    pub name: &'static str,

    /// What this shape detects, e.g. "Detect whether a review contains hate speech"
    pub description: &'static str,
}

impl OutputShape {
    /// Create a new output shape
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    /// Render the JSON-schema parameters for this shape's function.
    pub fn parameters(&self) -> serde_json::Value {
        verdict_parameters()
    }
}

/// The classification oracle.
///
/// `classify` forces the model to answer with the given output shape;
/// `complete` returns free text and is used by the confirmation step.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Classify a review against one category, answering with the shape.
    async fn classify(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        shape: &OutputShape,
    ) -> Result<Verdict>;

    /// Free-text completion at a higher sampling temperature.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
