//! Markdown outline rendering for inferred document structure.

use super::RenderOptions;
use crate::error::Result;
use crate::model::DocumentStructure;
use std::fmt::Write;

/// Convert a document structure to a Markdown outline.
///
/// The output carries the detected title as an H1, an outline of headings
/// with page and size annotations, the paragraph text grouped by page, and
/// optionally a table of entity mentions.
pub fn to_markdown(structure: &DocumentStructure, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();

    if options.include_frontmatter {
        render_frontmatter(&mut out, structure);
    }

    if let Some(ref title) = structure.title {
        writeln!(&mut out, "# {}", title).ok();
        out.push('\n');
    }

    if !structure.headings.is_empty() {
        writeln!(&mut out, "## Outline").ok();
        out.push('\n');

        let limit = if options.heading_limit == 0 {
            structure.headings.len()
        } else {
            options.heading_limit.min(structure.headings.len())
        };

        for heading in &structure.headings[..limit] {
            writeln!(
                &mut out,
                "- {} (p. {}, {:.1}pt)",
                heading.text, heading.page, heading.size
            )
            .ok();
        }
        if limit < structure.headings.len() {
            writeln!(&mut out, "- … and {} more", structure.headings.len() - limit).ok();
        }
        out.push('\n');
    }

    let mut last_page = None;
    for paragraph in &structure.paragraphs {
        if last_page != Some(paragraph.page) {
            writeln!(&mut out, "## Page {}", paragraph.page).ok();
            out.push('\n');
            last_page = Some(paragraph.page);
        }
        writeln!(&mut out, "{}", paragraph.text).ok();
        out.push('\n');
    }

    if options.include_entities && !structure.entities.is_empty() {
        writeln!(&mut out, "## Entities").ok();
        out.push('\n');
        writeln!(&mut out, "| Text | Label | Offsets |").ok();
        writeln!(&mut out, "|------|-------|---------|").ok();
        for entity in &structure.entities {
            writeln!(
                &mut out,
                "| {} | {} | {}..{} |",
                escape_pipes(&entity.text),
                entity.label,
                entity.start_char,
                entity.end_char
            )
            .ok();
        }
        out.push('\n');
    }

    // Trim a single trailing blank line
    while out.ends_with("\n\n") {
        out.pop();
    }

    Ok(out)
}

fn render_frontmatter(out: &mut String, structure: &DocumentStructure) {
    let stats = structure.stats();
    out.push_str("---\n");
    if let Some(ref title) = structure.title {
        writeln!(out, "title: \"{}\"", title.replace('"', "\\\"")).ok();
    }
    writeln!(out, "pages: {}", stats.page_count).ok();
    writeln!(out, "headings: {}", stats.heading_count).ok();
    writeln!(out, "paragraphs: {}", stats.paragraph_count).ok();
    writeln!(out, "entities: {}", stats.entity_count).ok();
    out.push_str("---\n\n");
}

fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityMention, Heading, Paragraph};

    fn sample() -> DocumentStructure {
        DocumentStructure {
            title: Some("Annual Report".into()),
            headings: vec![
                Heading {
                    text: "Introduction".into(),
                    page: 1,
                    size: 18.0,
                },
                Heading {
                    text: "Results".into(),
                    page: 2,
                    size: 18.0,
                },
            ],
            paragraphs: vec![
                Paragraph {
                    text: "First page body.".into(),
                    page: 1,
                },
                Paragraph {
                    text: "Second page body.".into(),
                    page: 2,
                },
            ],
            entities: vec![EntityMention::new("Acme", "ORG", 0, 4)],
        }
    }

    #[test]
    fn test_markdown_basic_layout() {
        let md = to_markdown(&sample(), &RenderOptions::default()).unwrap();
        assert!(md.starts_with("# Annual Report"));
        assert!(md.contains("## Outline"));
        assert!(md.contains("- Introduction (p. 1, 18.0pt)"));
        assert!(md.contains("## Page 1"));
        assert!(md.contains("First page body."));
        assert!(md.contains("## Entities"));
        assert!(md.contains("| Acme | ORG | 0..4 |"));
    }

    #[test]
    fn test_markdown_frontmatter() {
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("title: \"Annual Report\""));
        assert!(md.contains("pages: 2"));
        assert!(md.contains("headings: 2"));
    }

    #[test]
    fn test_markdown_heading_limit() {
        let options = RenderOptions::new().with_heading_limit(1);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.contains("- Introduction"));
        assert!(!md.contains("- Results"));
        assert!(md.contains("and 1 more"));
    }

    #[test]
    fn test_markdown_without_entities() {
        let options = RenderOptions::new().with_entities(false);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(!md.contains("## Entities"));
    }

    #[test]
    fn test_markdown_empty_structure() {
        let md = to_markdown(&DocumentStructure::new(), &RenderOptions::default()).unwrap();
        assert!(md.is_empty());
    }

    #[test]
    fn test_pipe_escaping_in_entity_table() {
        let mut structure = sample();
        structure.entities = vec![EntityMention::new("a|b", "MISC", 0, 3)];
        let md = to_markdown(&structure, &RenderOptions::default()).unwrap();
        assert!(md.contains("| a\\|b | MISC |"));
    }
}
