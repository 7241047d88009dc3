//! Named-entity mentions produced by an external recognizer.

use serde::{Deserialize, Serialize};

/// A named-entity mention from an external recognizer.
///
/// Offsets index into the space-joined concatenation of all span texts in
/// input order (see [`crate::analyze::joined_text`]) — the string the
/// recognizer is run over. The structurer copies mentions through verbatim
/// and never recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    /// Surface text of the mention.
    pub text: String,

    /// Entity label (e.g., "PERSON", "ORG", "DATE").
    pub label: String,

    /// Start character offset into the joined text.
    #[serde(rename = "start")]
    pub start_char: usize,

    /// End character offset into the joined text (exclusive).
    #[serde(rename = "end")]
    pub end_char: usize,
}

impl EntityMention {
    /// Create a new entity mention.
    pub fn new(
        text: impl Into<String>,
        label: impl Into<String>,
        start_char: usize,
        end_char: usize,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start_char,
            end_char,
        }
    }
}
