//! Error types for the docshape library.

use std::io;
use thiserror::Error;

/// Result type alias for docshape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during span ingestion and structuring.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a span dump.
    #[error("Unknown file format: not a valid span dump")]
    UnknownFormat,

    /// Error parsing dump content.
    #[error("Dump parsing error: {0}")]
    Parse(String),

    /// A span failed boundary validation in strict mode.
    #[error("Invalid span: {0}")]
    InvalidSpan(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// No extraction source accepts the given input.
    #[error("No extraction source for extension: {0}")]
    UnsupportedSource(String),

    /// Every source in the extraction chain failed or came back empty.
    #[error("All extraction sources exhausted: {0}")]
    Exhausted(String),

    /// Error loading an entity file.
    #[error("Entity loading error: {0}")]
    EntityLoad(String),

    /// Error during rendering (Markdown, JSON, report).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
