//! Data model types for positioned text and inferred document structure.
//!
//! This module defines the intermediate representation (IR) that bridges
//! span extraction and structure inference. The model is extractor-agnostic
//! and can represent spans from any layout-aware text source.

mod entity;
mod span;
mod structure;

pub use entity::EntityMention;
pub use span::{BBox, TextSpan};
pub use structure::{DocumentStructure, Heading, Paragraph, StructureStats};
