//! # docshape
//!
//! Layout-based document structure inference for Rust.
//!
//! This library consumes positioned text spans produced by external
//! OCR/layout extractors and infers document structure from font-size and
//! position heuristics: a title, headings, reading-order paragraphs, and
//! pass-through entity mentions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docshape::{structure_file, render};
//!
//! fn main() -> docshape::Result<()> {
//!     // Structure a span dump written by a layout extractor
//!     let doc = structure_file("document.spans.json")?;
//!
//!     // Render the outline as Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pure structuring core**: title, heading, and paragraph inference as
//!   a total function over spans — no I/O, no hidden state
//! - **Extraction chain**: ordered fallback over pluggable span sources
//! - **Multiple dump shapes**: JSON documents, bare arrays, JSON Lines,
//!   each optionally gzipped
//! - **Output formats**: JSON, Markdown outline, plain-text report
//! - **Batch mode**: parallel structuring across documents

pub mod analyze;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use analyze::{joined_text, structure, structure_batch};
pub use detect::{detect_dump_from_bytes, detect_dump_from_path, is_span_dump};
pub use error::{Error, Result};
pub use extract::{
    CleanupOptions, CleanupPreset, ErrorMode, ExtractOptions, Extraction, ExtractionChain,
    JsonSource, PageSelection, SpanSource,
};
pub use model::{BBox, DocumentStructure, EntityMention, Heading, Paragraph, TextSpan};
pub use render::{to_json, to_markdown, to_report, JsonFormat, RenderOptions, ReportOptions};

use rayon::prelude::*;
use std::path::Path;

/// Structure a span dump file with default options.
///
/// # Example
///
/// ```no_run
/// use docshape::structure_file;
///
/// let doc = structure_file("document.spans.json").unwrap();
/// println!("Title: {:?}", doc.title);
/// ```
pub fn structure_file<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    structure_file_with_options(path, &ExtractOptions::default())
}

/// Structure a span dump file with custom options.
///
/// # Example
///
/// ```no_run
/// use docshape::{structure_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().lenient();
/// let doc = structure_file_with_options("document.spans.json", &options).unwrap();
/// ```
pub fn structure_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<DocumentStructure> {
    let chain = ExtractionChain::with_defaults();
    let extraction = chain.extract(path.as_ref(), options)?;
    Ok(structure(&extraction.spans, &extraction.entities))
}

/// Structure a span dump from bytes.
///
/// The extension routes the bytes to the right source (e.g., `"json"`).
pub fn structure_bytes(data: &[u8], ext: &str, options: &ExtractOptions) -> Result<DocumentStructure> {
    let chain = ExtractionChain::with_defaults();
    let extraction = chain.extract_bytes(data, ext, options)?;
    Ok(structure(&extraction.spans, &extraction.entities))
}

/// Structure many span dump files in parallel.
///
/// Each document is independent, so files are distributed across the rayon
/// thread pool. Output order matches input order; per-file failures are
/// returned in place rather than aborting the batch.
pub fn structure_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<Result<DocumentStructure>> {
    structure_files_with_options(paths, &ExtractOptions::default())
}

/// Structure many span dump files in parallel with custom options.
pub fn structure_files_with_options<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &ExtractOptions,
) -> Vec<Result<DocumentStructure>> {
    paths
        .par_iter()
        .map(|path| structure_file_with_options(path, options))
        .collect()
}

/// Builder for configuring extraction and structuring in one place.
///
/// # Example
///
/// ```no_run
/// use docshape::Docshape;
///
/// let doc = Docshape::new()
///     .lenient()
///     .with_cleanup_preset(docshape::CleanupPreset::Standard)
///     .structure_file("document.spans.json")?;
/// # Ok::<(), docshape::Error>(())
/// ```
pub struct Docshape {
    chain: ExtractionChain,
    extract_options: ExtractOptions,
}

impl Docshape {
    /// Create a new builder with the default source chain.
    pub fn new() -> Self {
        Self {
            chain: ExtractionChain::with_defaults(),
            extract_options: ExtractOptions::default(),
        }
    }

    /// Enable lenient ingestion (skip invalid spans).
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Restrict ingestion to selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Apply a cleanup preset to span text.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.extract_options = self.extract_options.with_cleanup_preset(preset);
        self
    }

    /// Append an extraction source to the chain.
    pub fn with_source(mut self, source: std::sync::Arc<dyn SpanSource>) -> Self {
        self.chain.register(source);
        self
    }

    /// Extract and structure a span dump file.
    pub fn structure_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentStructure> {
        let extraction = self.chain.extract(path.as_ref(), &self.extract_options)?;
        Ok(structure(&extraction.spans, &extraction.entities))
    }

    /// Extract a span dump file, keeping the extraction record.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        self.chain.extract(path.as_ref(), &self.extract_options)
    }
}

impl Default for Docshape {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
