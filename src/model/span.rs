//! Positioned text spans produced by an upstream extractor.

use serde::{Deserialize, Serialize};

/// Page-local bounding box with origin at the top-left corner and y
/// increasing downward.
///
/// Serialized as a four-element array `[x0, y0, x1, y1]`, the wire shape
/// layout extractors emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Check the geometric invariants: finite coordinates, `x0 <= x1`,
    /// `y0 <= y1`.
    pub fn is_valid(&self) -> bool {
        let finite = [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|c| c.is_finite());
        finite && self.x0 <= self.x1 && self.y0 <= self.y1
    }
}

impl From<[f64; 4]> for BBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// A contiguous run of characters sharing font attributes, positioned on a
/// page.
///
/// Spans are produced by an external extractor (PDF geometry, OCR, vision
/// transcription) and consumed read-only by the structurer. `text` is never
/// empty or whitespace-only; the ingest layer enforces this at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Text content of the span.
    pub text: String,

    /// Page-local bounding box.
    pub bbox: BBox,

    /// 1-based page index.
    pub page: u32,

    /// Font family name.
    pub font: String,

    /// Font size in points.
    pub size: f64,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(
        text: impl Into<String>,
        bbox: BBox,
        page: u32,
        font: impl Into<String>,
        size: f64,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            page,
            font: font.into(),
            size,
        }
    }

    /// Text length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
