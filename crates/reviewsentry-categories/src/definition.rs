//! Category definition type

/// One review-policy category the oracle classifies against.
///
/// A definition is pure data: the orchestrator drives every category through
/// the same classify/confirm/notify sequence, so adding a policy category
/// means adding one definition block to the catalogue and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDefinition {
    /// Display name used in output rows and email subjects
    pub name: &'static str,

    /// Identifier of the oracle function the model must call
    pub function_name: &'static str,

    /// One-line description of what the output shape detects
    pub shape_description: &'static str,

    /// Literal few-shot block: one positive and one negative example pair
    pub few_shot: &'static str,
}
