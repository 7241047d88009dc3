//! JSON span dump source.
//!
//! The bundled concrete [`SpanSource`]: reads the dump files layout
//! extractors write, in three shapes:
//!
//! - a document object `{"spans": [...], "entities": [...]}`
//! - a bare span array `[...]`
//! - JSON Lines, one span object per line
//!
//! each optionally gzipped. Span invariants are validated at this boundary
//! so the structurer downstream never sees malformed input.

use super::{ErrorMode, ExtractOptions, SourceOutput, SpanSource};
use crate::detect::{detect_dump_from_bytes, DumpEncoding};
use crate::error::{Error, Result};
use crate::extract::CleanupPipeline;
use crate::model::{EntityMention, TextSpan};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

/// A span dump document with optional entities.
#[derive(Debug, Deserialize)]
struct DumpDocument {
    spans: Vec<TextSpan>,
    #[serde(default)]
    entities: Vec<EntityMention>,
}

/// Accepted top-level shapes of a JSON dump.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DumpPayload {
    Document(DumpDocument),
    Spans(Vec<TextSpan>),
}

/// JSON span dump source.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
    _private: (),
}

impl JsonSource {
    /// Create a new JSON source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn parse(&self, bytes: &[u8], options: &ExtractOptions) -> Result<SourceOutput> {
        let format = detect_dump_from_bytes(bytes)?;

        let payload: Vec<u8>;
        let data = if format.gzipped {
            let mut decoder = GzDecoder::new(bytes);
            let mut buf = Vec::new();
            decoder.read_to_end(&mut buf)?;
            payload = buf;
            &payload[..]
        } else {
            bytes
        };

        let (raw_spans, entities) = match format.encoding {
            DumpEncoding::Json => match serde_json::from_slice::<DumpPayload>(data)? {
                DumpPayload::Document(doc) => (doc.spans, doc.entities),
                DumpPayload::Spans(spans) => (spans, Vec::new()),
            },
            DumpEncoding::JsonLines => {
                let text = std::str::from_utf8(data)
                    .map_err(|e| Error::Parse(format!("invalid UTF-8: {}", e)))?;
                let mut spans = Vec::new();
                for (lineno, line) in text.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let span: TextSpan = serde_json::from_str(line).map_err(|e| {
                        Error::Parse(format!("line {}: {}", lineno + 1, e))
                    })?;
                    spans.push(span);
                }
                (spans, Vec::new())
            }
        };

        let spans = self.validate(raw_spans, options)?;
        Ok(SourceOutput { spans, entities })
    }

    /// Enforce the span invariants at the boundary, then apply page
    /// selection and text cleanup.
    fn validate(&self, raw: Vec<TextSpan>, options: &ExtractOptions) -> Result<Vec<TextSpan>> {
        let pipeline = options.cleanup.clone().map(CleanupPipeline::new);
        let mut spans = Vec::with_capacity(raw.len());

        for mut span in raw {
            if let Some(reason) = invalid_reason(&span) {
                match options.error_mode {
                    ErrorMode::Strict => return Err(Error::InvalidSpan(reason)),
                    ErrorMode::Lenient => {
                        log::warn!("skipping invalid span: {}", reason);
                        continue;
                    }
                }
            }

            if !options.pages.includes(span.page) {
                continue;
            }

            if let Some(ref pipeline) = pipeline {
                span.text = pipeline.process(&span.text);
                if span.text.is_empty() {
                    log::debug!("dropping span blanked by cleanup on page {}", span.page);
                    continue;
                }
            }

            spans.push(span);
        }

        Ok(spans)
    }
}

fn invalid_reason(span: &TextSpan) -> Option<String> {
    if span.text.trim().is_empty() {
        return Some(format!("blank text on page {}", span.page));
    }
    if span.page == 0 {
        return Some("page index is 0 (pages are 1-based)".to_string());
    }
    if !span.bbox.is_valid() {
        return Some(format!(
            "invalid bbox [{}, {}, {}, {}] on page {}",
            span.bbox.x0, span.bbox.y0, span.bbox.x1, span.bbox.y1, span.page
        ));
    }
    if !span.size.is_finite() {
        return Some(format!("non-finite font size on page {}", span.page));
    }
    None
}

impl SpanSource for JsonSource {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json", "jsonl", "ndjson", "gz"]
    }

    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<SourceOutput> {
        let bytes = fs::read(path)?;
        self.parse(&bytes, options)
    }

    fn extract_bytes(&self, bytes: &[u8], options: &ExtractOptions) -> Result<SourceOutput> {
        self.parse(bytes, options)
    }
}

/// Load entity mentions from a standalone recognizer output file.
///
/// Accepts either a bare array of mentions or an object with an `entities`
/// field.
pub fn load_entities<P: AsRef<Path>>(path: P) -> Result<Vec<EntityMention>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum EntityPayload {
        Wrapped { entities: Vec<EntityMention> },
        Bare(Vec<EntityMention>),
    }

    let bytes = fs::read(path)?;
    let payload: EntityPayload = serde_json::from_slice(&bytes)
        .map_err(|e| Error::EntityLoad(e.to_string()))?;

    Ok(match payload {
        EntityPayload::Wrapped { entities } => entities,
        EntityPayload::Bare(entities) => entities,
    })
}
