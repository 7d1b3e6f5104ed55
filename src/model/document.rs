//! Document-level types.

use super::DocumentOutline;
use serde::{Deserialize, Serialize};

/// Everything extracted from one loaded document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source file name
    pub filename: String,
    /// Inferred outline
    pub outline: DocumentOutline,
    /// Page-delimited full text
    pub full_text: String,
    /// Total number of pages in the source document
    pub total_pages: u32,
    /// Pages whose extraction failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_pages: Vec<u32>,
}

impl DocumentRecord {
    /// Create a new record.
    pub fn new(
        filename: impl Into<String>,
        outline: DocumentOutline,
        full_text: impl Into<String>,
        total_pages: u32,
    ) -> Self {
        Self {
            filename: filename.into(),
            outline,
            full_text: full_text.into(),
            total_pages,
            failed_pages: Vec::new(),
        }
    }

    /// Attach the list of pages that failed extraction.
    pub fn with_failed_pages(mut self, pages: Vec<u32>) -> Self {
        self.failed_pages = pages;
        self
    }

    /// Approximate word count of the full text (page markers excluded).
    pub fn word_count(&self) -> usize {
        self.full_text
            .lines()
            .filter(|line| !(line.starts_with("--- PAGE ") && line.ends_with(" ---")))
            .map(|line| line.split_whitespace().count())
            .sum()
    }
}
