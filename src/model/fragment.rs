//! Text fragment types.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A text item exactly as the PDF engine reports it.
///
/// `transform` is the combined text/graphics matrix `[a, b, c, d, e, f]`;
/// the baseline origin is `(e, f)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Untrimmed text content
    pub text: String,
    /// Glyph bounding height in user space units
    pub height: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Combined transform
    pub transform: [f32; 6],
}

impl RawFragment {
    /// Create a raw fragment positioned at `(x, y)` with an unscaled transform.
    pub fn new(text: impl Into<String>, height: f32, font_name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            height,
            font_name: font_name.into(),
            transform: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Baseline X coordinate.
    pub fn x(&self) -> f32 {
        self.transform[4]
    }

    /// Baseline Y coordinate.
    pub fn y(&self) -> f32 {
        self.transform[5]
    }
}

/// The fragments the engine produced for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFragments {
    /// Page number (1-indexed)
    pub page: u32,
    /// Fragments in content-stream order
    pub fragments: Vec<RawFragment>,
    /// Extraction failure message; `fragments` is empty when set
    pub failure: Option<String>,
}

impl PageFragments {
    /// Create a successfully extracted page.
    pub fn new(page: u32, fragments: Vec<RawFragment>) -> Self {
        Self {
            page,
            fragments,
            failure: None,
        }
    }

    /// Create a page whose extraction failed.
    pub fn failed(page: u32, message: impl Into<String>) -> Self {
        Self {
            page,
            fragments: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Whether extraction of this page failed.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// One normalized, positioned run of text used for outline inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Trimmed text, always longer than one character
    pub text: String,
    /// Size rounded to 0.1 units, kept in double precision for threshold checks
    pub size: f64,
    /// Whether the font name marks the run as bold
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Baseline X coordinate
    pub x: f32,
    /// Baseline Y coordinate
    pub y: f32,
}

impl TextFragment {
    /// Create a fragment directly (used by tests and custom engines).
    pub fn new(text: impl Into<String>, size: f64, bold: bool, page: u32) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            page,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Normalize a raw engine fragment.
    ///
    /// Returns `None` when the trimmed text has fewer than two characters.
    pub fn from_raw(raw: &RawFragment, page: u32) -> Option<Self> {
        let normalized: String = raw.text.nfc().collect();
        let text = normalized.trim();
        if text.chars().count() <= 1 {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            size: round_size(raw.height),
            bold: is_bold_font(&raw.font_name),
            page,
            x: raw.x(),
            y: raw.y(),
        })
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Round a glyph height to one decimal place.
///
/// The result is the nearest `f64` to the rounded decimal, so `11.7` compares
/// against `13.0 * 0.9` the same way a double literal would.
pub fn round_size(height: f32) -> f64 {
    (f64::from(height) * 10.0).round() / 10.0
}

/// Whether a font name denotes a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}
