//! Layout-based document structure inference.
//!
//! The structurer is a pure function over positioned text spans: it derives
//! a title, headings, and paragraphs from font-size and position heuristics,
//! and passes externally recognized entity mentions through unchanged. It
//! performs no I/O, holds no state between calls, and is safe to invoke in
//! parallel across documents.

use crate::extract::Extraction;
use crate::model::{DocumentStructure, EntityMention, Heading, Paragraph, TextSpan};
use rayon::prelude::*;

/// Minimum title length in characters, exclusive.
pub const TITLE_MIN_CHARS: usize = 3;

/// A span is a heading when its size exceeds this multiple of the mean size.
pub const HEADING_SIZE_RATIO: f64 = 1.2;

/// Maximum heading length in characters, exclusive.
pub const HEADING_MAX_CHARS: usize = 100;

/// Infer document structure from positioned text spans.
///
/// `spans` need not be pre-sorted and may be empty, in which case the result
/// carries no title, no headings, no paragraphs, and the entities unchanged.
/// `entities` come from an external recognizer run over [`joined_text`] and
/// are copied through verbatim, in recognizer order.
///
/// # Example
///
/// ```
/// use docshape::model::{BBox, TextSpan};
/// use docshape::analyze::structure;
///
/// let spans = vec![
///     TextSpan::new("Annual Report", BBox::new(72.0, 40.0, 300.0, 64.0), 1, "Helvetica-Bold", 24.0),
///     TextSpan::new("Revenue grew this year.", BBox::new(72.0, 90.0, 400.0, 102.0), 1, "Helvetica", 11.0),
/// ];
/// let doc = structure(&spans, &[]);
/// assert_eq!(doc.title.as_deref(), Some("Annual Report"));
/// ```
pub fn structure(spans: &[TextSpan], entities: &[EntityMention]) -> DocumentStructure {
    DocumentStructure {
        title: detect_title(spans),
        headings: detect_headings(spans),
        paragraphs: assemble_paragraphs(spans),
        entities: entities.to_vec(),
    }
}

/// Structure many extractions in parallel.
///
/// Each call to [`structure`] is independent and stateless, so documents are
/// processed across the rayon thread pool. Output order matches input order.
pub fn structure_batch(extractions: &[Extraction]) -> Vec<DocumentStructure> {
    extractions
        .par_iter()
        .map(|ex| structure(&ex.spans, &ex.entities))
        .collect()
}

/// The space-joined concatenation of all span texts in input order.
///
/// This is the exact string an external entity recognizer must be run over
/// for its character offsets to line up with [`EntityMention`].
pub fn joined_text(spans: &[TextSpan]) -> String {
    spans
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Highest-font-size span on page 1 longer than [`TITLE_MIN_CHARS`], ties
/// broken by first occurrence in input order.
fn detect_title(spans: &[TextSpan]) -> Option<String> {
    spans
        .iter()
        .filter(|s| s.page == 1 && s.char_len() > TITLE_MIN_CHARS)
        .fold(None::<&TextSpan>, |best, candidate| match best {
            Some(b) if candidate.size <= b.size => Some(b),
            _ => Some(candidate),
        })
        .map(|s| s.text.clone())
}

/// Spans larger than [`HEADING_SIZE_RATIO`] times the mean size over all
/// spans and shorter than [`HEADING_MAX_CHARS`], in input order.
fn detect_headings(spans: &[TextSpan]) -> Vec<Heading> {
    if spans.is_empty() {
        return Vec::new();
    }

    let avg_size = spans.iter().map(|s| s.size).sum::<f64>() / spans.len() as f64;

    spans
        .iter()
        .filter(|s| s.size > avg_size * HEADING_SIZE_RATIO && s.char_len() < HEADING_MAX_CHARS)
        .map(|s| Heading {
            text: s.text.clone(),
            page: s.page,
            size: s.size,
        })
        .collect()
}

/// Concatenate spans in reading order, flushing a paragraph at each page
/// boundary.
///
/// Spans are stable-sorted by `(page, y0)`, which approximates reading order
/// for single-column layouts; multi-column pages may interleave. Breaks are
/// driven purely by page transitions — vertical gaps and font changes do not
/// split paragraphs, so a page collapses into one paragraph record.
fn assemble_paragraphs(spans: &[TextSpan]) -> Vec<Paragraph> {
    let mut ordered: Vec<&TextSpan> = spans.iter().collect();
    ordered.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then_with(|| a.bbox.y0.total_cmp(&b.bbox.y0))
    });

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut current_page = 1u32;

    for span in ordered {
        if span.page != current_page {
            if !current.is_empty() {
                paragraphs.push(Paragraph {
                    text: current.trim().to_string(),
                    page: current_page,
                });
                current.clear();
            }
            current_page = span.page;
        }

        current.push(' ');
        current.push_str(&span.text);
    }

    if !current.is_empty() {
        paragraphs.push(Paragraph {
            text: current.trim().to_string(),
            page: current_page,
        });
    }

    paragraphs
}
