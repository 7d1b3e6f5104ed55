//! Outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heuristic heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in outputs ("H1", "H2", "H3").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inferred heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The inferred structure of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Detected title, empty when none was found
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Whether a title was detected.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of headings (title excluded).
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Iterate over the headings.
    pub fn entries(&self) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter()
    }
}

/// An outline entry with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The matched heading
    #[serde(flatten)]
    pub entry: OutlineEntry,
    /// Number of query keywords found in the heading (always ≥ 1)
    pub score: u32,
}

impl ScoredSection {
    /// Heading level of the section.
    pub fn level(&self) -> HeadingLevel {
        self.entry.level
    }

    /// Heading text of the section.
    pub fn text(&self) -> &str {
        &self.entry.text
    }

    /// Page of the section.
    pub fn page(&self) -> u32 {
        self.entry.page
    }
}
