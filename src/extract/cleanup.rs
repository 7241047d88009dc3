//! Span text cleanup pipeline.
//!
//! OCR and PDF extractors leak ligature codepoints, control characters, and
//! ragged whitespace into span text. Cleanup runs before the entity
//! recognizer sees the joined text; entity offsets always refer to the
//! recognizer's own input, so cleaning here never invalidates them.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + ligatures + control characters
    #[default]
    Standard,
    /// Aggressive cleanup: maximum normalization
    Aggressive,
}

/// Options for span text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Expand ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Strip ASCII control characters
    pub strip_control_chars: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Collapse runs of whitespace into single spaces
    pub collapse_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            strip_control_chars: false,
            remove_replacement_char: false,
            remove_pua: false,
            collapse_whitespace: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            strip_control_chars: true,
            remove_replacement_char: true,
            remove_pua: false,
            collapse_whitespace: true,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            strip_control_chars: true,
            remove_replacement_char: true,
            remove_pua: true,
            collapse_whitespace: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Span text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    whitespace_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ (long s + t)
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process one span's text through the pipeline.
    ///
    /// Returns the cleaned text; the caller drops spans whose text comes
    /// back empty, keeping the non-blank invariant intact.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                if result.contains(ligature) {
                    result = result.replace(ligature, replacement);
                }
            }
        }

        if self.options.strip_control_chars {
            result.retain(|c| !c.is_control() || c == '\n' || c == '\t');
        }

        if self.options.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        if self.options.remove_pua {
            result.retain(|c| !is_pua(c));
        }

        if self.options.collapse_whitespace {
            result = self
                .whitespace_regex
                .replace_all(result.trim(), " ")
                .into_owned();
        }

        result
    }
}

fn is_pua(c: char) -> bool {
    matches!(c as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}
