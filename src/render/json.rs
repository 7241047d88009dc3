//! JSON rendering for inferred document structure.

use crate::error::{Error, Result};
use crate::model::DocumentStructure;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document structure to JSON.
pub fn to_json(structure: &DocumentStructure, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(structure),
        JsonFormat::Compact => serde_json::to_string(structure),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_to_json_pretty() {
        let structure = DocumentStructure {
            title: Some("Test".to_string()),
            paragraphs: vec![Paragraph {
                text: "Hello".into(),
                page: 1,
            }],
            ..Default::default()
        };

        let json = to_json(&structure, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let structure = DocumentStructure::new();
        let json = to_json(&structure, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }
}
