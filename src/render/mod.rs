//! Rendering module for converting inferred structure to output formats.

mod json;
mod markdown;
mod options;
mod report;

pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
pub use report::{to_report, ReportOptions};
