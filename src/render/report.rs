//! Plain-text analysis report.
//!
//! Mirrors the summary an interactive analysis session prints: the title,
//! a capped numbered list of headings with page numbers, and paragraph and
//! entity counts.

use crate::model::DocumentStructure;
use std::fmt::Write;

/// Options for the analysis report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Maximum headings listed before the overflow line.
    pub heading_limit: usize,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of listed headings.
    pub fn with_heading_limit(mut self, limit: usize) -> Self {
        self.heading_limit = limit;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { heading_limit: 5 }
    }
}

/// Render a document structure as a plain-text report.
pub fn to_report(structure: &DocumentStructure, options: &ReportOptions) -> String {
    let mut out = String::new();

    out.push_str("Document Structure:\n");

    if let Some(ref title) = structure.title {
        writeln!(&mut out, "Title: {}", title).ok();
    }

    writeln!(&mut out, "\nHeadings ({}):", structure.headings.len()).ok();
    let limit = options.heading_limit.min(structure.headings.len());
    for (i, heading) in structure.headings[..limit].iter().enumerate() {
        writeln!(&mut out, "  {}. {} (Page {})", i + 1, heading.text, heading.page).ok();
    }
    if structure.headings.len() > limit {
        writeln!(&mut out, "  ... and {} more", structure.headings.len() - limit).ok();
    }

    writeln!(&mut out, "\nParagraphs: {}", structure.paragraphs.len()).ok();
    writeln!(&mut out, "Entities: {}", structure.entities.len()).ok();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    fn with_headings(count: usize) -> DocumentStructure {
        DocumentStructure {
            title: Some("My Doc".into()),
            headings: (0..count)
                .map(|i| Heading {
                    text: format!("Heading {}", i + 1),
                    page: (i + 1) as u32,
                    size: 18.0,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_lists_headings_with_pages() {
        let report = to_report(&with_headings(2), &ReportOptions::default());
        assert!(report.starts_with("Document Structure:\n"));
        assert!(report.contains("Title: My Doc"));
        assert!(report.contains("Headings (2):"));
        assert!(report.contains("  1. Heading 1 (Page 1)"));
        assert!(report.contains("  2. Heading 2 (Page 2)"));
        assert!(!report.contains("more"));
    }

    #[test]
    fn test_report_caps_headings_with_overflow_line() {
        let report = to_report(&with_headings(8), &ReportOptions::default());
        assert!(report.contains("Headings (8):"));
        assert!(report.contains("  5. Heading 5 (Page 5)"));
        assert!(!report.contains("Heading 6"));
        assert!(report.contains("  ... and 3 more"));
    }

    #[test]
    fn test_report_without_title() {
        let structure = DocumentStructure::new();
        let report = to_report(&structure, &ReportOptions::default());
        assert!(!report.contains("Title:"));
        assert!(report.contains("Headings (0):"));
        assert!(report.contains("Paragraphs: 0"));
        assert!(report.contains("Entities: 0"));
    }
}
