//! Span extraction layer with a fallback chain of pluggable sources.
//!
//! A [`SpanSource`] turns a file into positioned text spans plus entity
//! mentions. Sources are tried in registration order by an
//! [`ExtractionChain`]: a source that does not support the input extension
//! is skipped, a source that errors or returns no spans falls through to the
//! next one, and the first non-empty result wins. Every attempt is recorded
//! so callers can see which engines were consulted.
//!
//! # Example
//!
//! ```no_run
//! use docshape::extract::{ExtractionChain, ExtractOptions};
//! use std::path::Path;
//!
//! fn main() -> docshape::Result<()> {
//!     let chain = ExtractionChain::with_defaults();
//!     let extraction = chain.extract(Path::new("spans.json"), &ExtractOptions::default())?;
//!     println!("{} spans from {}", extraction.spans.len(), extraction.source);
//!     Ok(())
//! }
//! ```

mod cleanup;
mod json;
mod options;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{load_entities, JsonSource};
pub use options::{ErrorMode, ExtractOptions, PageSelection};

use crate::error::{Error, Result};
use crate::model::{EntityMention, TextSpan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Spans and entities produced by a single source.
#[derive(Debug, Clone, Default)]
pub struct SourceOutput {
    /// Extracted text spans.
    pub spans: Vec<TextSpan>,

    /// Entity mentions, if the source carries them.
    pub entities: Vec<EntityMention>,
}

impl SourceOutput {
    /// Create output with spans only.
    pub fn spans_only(spans: Vec<TextSpan>) -> Self {
        Self {
            spans,
            entities: Vec::new(),
        }
    }
}

/// Trait for span extraction sources.
///
/// Implement this trait to plug a new extraction engine (OCR output, vision
/// transcription, PDF geometry dump) into the chain.
pub trait SpanSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Extract spans from a file at the given path.
    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<SourceOutput>;

    /// Extract spans from bytes.
    fn extract_bytes(&self, bytes: &[u8], options: &ExtractOptions) -> Result<SourceOutput>;

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Why a source in the chain did not produce the winning result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum AttemptOutcome {
    /// The source does not handle the input's extension.
    Unsupported,
    /// The source ran but returned no spans.
    Empty,
    /// The source returned an error.
    Failed(String),
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Unsupported => write!(f, "unsupported extension"),
            AttemptOutcome::Empty => write!(f, "no spans"),
            AttemptOutcome::Failed(reason) => write!(f, "{}", reason),
        }
    }
}

/// Record of one source consulted by the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttempt {
    /// Source name.
    pub source: String,

    /// Why the source was passed over.
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Result of a successful extraction.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// Extracted text spans.
    pub spans: Vec<TextSpan>,

    /// Entity mentions supplied alongside the spans.
    pub entities: Vec<EntityMention>,

    /// Name of the source that produced the spans.
    pub source: String,

    /// Sources consulted before this one succeeded.
    pub attempts: Vec<SourceAttempt>,

    /// When the extraction completed.
    pub extracted_at: DateTime<Utc>,
}

impl Extraction {
    /// Number of distinct pages the spans cover.
    pub fn page_count(&self) -> u32 {
        let mut pages: Vec<u32> = self.spans.iter().map(|s| s.page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages.len() as u32
    }
}

/// Ordered chain of extraction sources tried until one yields spans.
pub struct ExtractionChain {
    sources: Vec<Arc<dyn SpanSource>>,
}

impl ExtractionChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Create a chain with the default sources (JSON span dumps).
    pub fn with_defaults() -> Self {
        let mut chain = Self::new();
        chain.register(Arc::new(JsonSource::new()));
        chain
    }

    /// Append a source to the end of the chain.
    pub fn register(&mut self, source: Arc<dyn SpanSource>) {
        self.sources.push(source);
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_source(mut self, source: Arc<dyn SpanSource>) -> Self {
        self.register(source);
        self
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Check if any source supports the given extension.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.iter().any(|s| s.supports_extension(ext))
    }

    /// Extract spans from a file, trying each source in order.
    ///
    /// Returns the first non-empty result, with the attempts made along the
    /// way recorded on it. Fails with [`Error::Exhausted`] when every source
    /// was skipped, errored, or came back empty.
    pub fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<Extraction> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        self.run(&ext, |source| source.extract(path, options))
    }

    /// Extract spans from bytes, using the extension to route sources.
    pub fn extract_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ExtractOptions,
    ) -> Result<Extraction> {
        self.run(&ext.to_lowercase(), |source| {
            source.extract_bytes(bytes, options)
        })
    }

    fn run<F>(&self, ext: &str, mut attempt: F) -> Result<Extraction>
    where
        F: FnMut(&dyn SpanSource) -> Result<SourceOutput>,
    {
        if self.sources.is_empty() {
            return Err(Error::UnsupportedSource(ext.to_string()));
        }

        let mut attempts = Vec::new();

        for source in &self.sources {
            if !source.supports_extension(ext) {
                attempts.push(SourceAttempt {
                    source: source.name().to_string(),
                    outcome: AttemptOutcome::Unsupported,
                });
                continue;
            }

            match attempt(source.as_ref()) {
                Ok(output) if output.spans.is_empty() => {
                    log::debug!("source {} returned no spans, falling through", source.name());
                    attempts.push(SourceAttempt {
                        source: source.name().to_string(),
                        outcome: AttemptOutcome::Empty,
                    });
                }
                Ok(output) => {
                    return Ok(Extraction {
                        spans: output.spans,
                        entities: output.entities,
                        source: source.name().to_string(),
                        attempts,
                        extracted_at: Utc::now(),
                    });
                }
                Err(e) => {
                    log::warn!("source {} failed: {}", source.name(), e);
                    attempts.push(SourceAttempt {
                        source: source.name().to_string(),
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    });
                }
            }
        }

        let summary = attempts
            .iter()
            .map(|a| format!("{}: {}", a.source, a.outcome))
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::Exhausted(summary))
    }
}

impl Default for ExtractionChain {
    fn default() -> Self {
        Self::with_defaults()
    }
}
