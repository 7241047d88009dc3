//! Inferred document structure and its summary statistics.

use serde::{Deserialize, Serialize};

use super::EntityMention;

/// A heading detected from font-size layout heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text.
    pub text: String,

    /// 1-based page the heading appears on.
    pub page: u32,

    /// Font size of the source span in points.
    pub size: f64,
}

/// A paragraph assembled from consecutive spans in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Concatenated paragraph text.
    pub text: String,

    /// 1-based page the paragraph belongs to.
    pub page: u32,
}

/// Structured summary of a document, inferred from positioned text spans.
///
/// Constructed once by [`crate::analyze::structure`] and immutable after
/// construction. Sequences preserve the order the structurer emitted them
/// in; `entities` preserves recognizer order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Detected title, if any page-1 span qualified.
    pub title: Option<String>,

    /// Headings in span input order.
    pub headings: Vec<Heading>,

    /// Paragraphs in reading order, one per page touched.
    pub paragraphs: Vec<Paragraph>,

    /// Entity mentions, copied verbatim from the external recognizer.
    pub entities: Vec<EntityMention>,
}

impl DocumentStructure {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing at all was detected or passed through.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.headings.is_empty()
            && self.paragraphs.is_empty()
            && self.entities.is_empty()
    }

    /// Compute summary statistics over the structure.
    pub fn stats(&self) -> StructureStats {
        let mut stats = StructureStats {
            heading_count: self.headings.len() as u32,
            paragraph_count: self.paragraphs.len() as u32,
            entity_count: self.entities.len() as u32,
            ..Default::default()
        };

        let mut pages: Vec<u32> = self.paragraphs.iter().map(|p| p.page).collect();
        pages.sort_unstable();
        pages.dedup();
        stats.page_count = pages.len() as u32;

        for paragraph in &self.paragraphs {
            stats.count_text(&paragraph.text);
        }

        stats
    }
}

/// Statistics summarizing an inferred document structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureStats {
    /// Number of distinct pages represented by paragraphs.
    pub page_count: u32,

    /// Number of detected headings.
    pub heading_count: u32,

    /// Number of assembled paragraphs.
    pub paragraph_count: u32,

    /// Number of entity mentions.
    pub entity_count: u32,

    /// Approximate word count (whitespace-separated tokens).
    pub word_count: u32,

    /// Character count (excluding whitespace).
    pub char_count: u32,
}

impl StructureStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
