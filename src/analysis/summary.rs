//! Extractive summary digest.
//!
//! A keyword and length filter over the sentences of each page, framed by the
//! outline and a few document statistics. No language understanding is
//! involved; sentences are split on terminal punctuation only.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{DocumentRecord, OutlineEntry};

/// Words that mark a sentence as worth keeping.
const KEY_WORDS: [&str; 13] = [
    "important",
    "key",
    "main",
    "significant",
    "conclusion",
    "result",
    "summary",
    "overview",
    "challenge",
    "mission",
    "objective",
    "goal",
    "purpose",
];

const MIN_SENTENCE_LEN: usize = 20;
const LONG_SENTENCE_LEN: usize = 50;
const MIN_BULLET_LEN: usize = 10;
const MAX_POINTS_PER_PAGE: usize = 8;
const FIRST_SENTENCES: usize = 3;
const MAX_POINTS_UNPAGED: usize = 10;

/// Coarse document category guessed from its vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Competition,
    Report,
    Manual,
    Proposal,
    Contract,
    General,
}

impl DocumentType {
    /// Classify by the first matching keyword group.
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["hackathon", "challenge"]) {
            DocumentType::Competition
        } else if has(&["report", "analysis"]) {
            DocumentType::Report
        } else if has(&["manual", "guide"]) {
            DocumentType::Manual
        } else if has(&["proposal"]) {
            DocumentType::Proposal
        } else if has(&["contract", "agreement"]) {
            DocumentType::Contract
        } else {
            DocumentType::General
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Competition => "Competition/Challenge Document",
            DocumentType::Report => "Report/Analysis",
            DocumentType::Manual => "Manual/Guide",
            DocumentType::Proposal => "Proposal",
            DocumentType::Contract => "Contract/Agreement",
            DocumentType::General => "General Document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key points extracted from one page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePoints {
    pub page: u32,
    pub points: Vec<String>,
}

/// Summary digest of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Outline entries listed as the document structure
    pub structure: Vec<OutlineEntry>,
    /// Key points per page, in page order
    pub pages: Vec<PagePoints>,
    /// Key points of the whole text when it carries no page markers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpaged_points: Vec<String>,
    pub total_pages: u32,
    pub total_sections: usize,
    pub document_type: DocumentType,
}

/// Summarize a loaded document.
pub fn generate_summary(record: &DocumentRecord) -> DocumentSummary {
    let sections = split_pages(&record.full_text);

    let (pages, unpaged_points) = if sections.is_empty() {
        (Vec::new(), unpaged_points(&record.full_text))
    } else {
        let pages = sections
            .into_iter()
            .map(|(page, content)| PagePoints {
                page,
                points: page_points(content),
            })
            .collect();
        (pages, Vec::new())
    };

    DocumentSummary {
        structure: record.outline.outline.clone(),
        pages,
        unpaged_points,
        total_pages: record.total_pages.max(1),
        total_sections: record.outline.len(),
        document_type: DocumentType::detect(&record.full_text),
    }
}

/// Split page-delimited text into `(page, trimmed content)` sections.
fn split_pages(full_text: &str) -> Vec<(u32, &str)> {
    let marker = Regex::new(r"--- PAGE (\d+) ---").unwrap();
    let matches: Vec<_> = marker.captures_iter(full_text).collect();

    matches
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let page = caps[1].parse().ok()?;
            let end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(full_text.len(), |m| m.start());
            Some((page, full_text[whole.end()..end].trim()))
        })
        .collect()
}

/// Sentences with more than [`MIN_SENTENCE_LEN`] characters once trimmed.
fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .filter(|s| s.trim().chars().count() > MIN_SENTENCE_LEN)
        .collect()
}

fn is_key_sentence(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    KEY_WORDS.iter().any(|w| lower.contains(w)) || sentence.chars().count() > LONG_SENTENCE_LEN
}

fn bullets<'a>(sentences: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_BULLET_LEN)
        .map(str::to_string)
        .collect()
}

fn page_points(content: &str) -> Vec<String> {
    let sentences = sentences(content);
    let key: Vec<&str> = sentences
        .iter()
        .copied()
        .filter(|s| is_key_sentence(s))
        .take(MAX_POINTS_PER_PAGE)
        .collect();

    if key.is_empty() {
        bullets(sentences.into_iter().take(FIRST_SENTENCES))
    } else {
        bullets(key)
    }
}

fn unpaged_points(full_text: &str) -> Vec<String> {
    bullets(
        sentences(full_text)
            .into_iter()
            .filter(|s| is_key_sentence(s))
            .take(MAX_POINTS_UNPAGED),
    )
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.structure.is_empty() {
            writeln!(f, "**Document Structure:**")?;
            for (i, entry) in self.structure.iter().enumerate() {
                writeln!(f, "{}. {} (Page {})", i + 1, entry.text, entry.page)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "**Key Points:**")?;
        for page in &self.pages {
            writeln!(f, "--- PAGE {} ---", page.page)?;
            for point in &page.points {
                writeln!(f, "• {}.", point)?;
            }
            writeln!(f)?;
        }
        for point in &self.unpaged_points {
            writeln!(f, "• {}.", point)?;
        }

        writeln!(f)?;
        writeln!(f, "**Document Statistics:**")?;
        writeln!(f, "• Total Pages: {}", self.total_pages)?;
        writeln!(f, "• Total Sections: {}", self.total_sections)?;
        writeln!(f, "• Document Type: {}", self.document_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentOutline, HeadingLevel};

    fn record(full_text: &str, entries: Vec<OutlineEntry>, pages: u32) -> DocumentRecord {
        DocumentRecord::new("doc.pdf", DocumentOutline::new("Doc", entries), full_text, pages)
    }

    #[test]
    fn test_document_type_first_match_wins() {
        assert_eq!(
            DocumentType::detect("Hackathon report and analysis"),
            DocumentType::Competition
        );
        assert_eq!(DocumentType::detect("Quarterly REPORT"), DocumentType::Report);
        assert_eq!(DocumentType::detect("User guide"), DocumentType::Manual);
        assert_eq!(DocumentType::detect("A proposal"), DocumentType::Proposal);
        assert_eq!(DocumentType::detect("Rental agreement"), DocumentType::Contract);
        assert_eq!(DocumentType::detect("Cooking recipes"), DocumentType::General);
        assert_eq!(DocumentType::General.to_string(), "General Document");
    }

    #[test]
    fn test_split_pages() {
        let text = "\n--- PAGE 1 ---\nFirst page \n\n--- PAGE 2 ---\nSecond page \n";
        assert_eq!(split_pages(text), vec![(1, "First page"), (2, "Second page")]);
        assert!(split_pages("no markers").is_empty());
    }

    #[test]
    fn test_key_points_prefer_keywords_and_long_sentences() {
        let content = "The main goal is to ship on time. Short one here ok. \
                       Lunch is served at noon daily. \
                       This sentence is deliberately written to be longer than fifty characters";
        let points = page_points(content);
        assert_eq!(
            points,
            vec![
                "The main goal is to ship on time",
                "This sentence is deliberately written to be longer than fifty characters",
            ]
        );
    }

    #[test]
    fn test_key_points_fall_back_to_first_sentences() {
        let content = "Lunch is served at noon daily. Dinner is at seven sharp. \
                       Breakfast starts at six am. Snacks are free all day.";
        let points = page_points(content);
        assert_eq!(
            points,
            vec![
                "Lunch is served at noon daily",
                "Dinner is at seven sharp",
                "Breakfast starts at six am",
            ]
        );
    }

    #[test]
    fn test_key_points_capped_per_page() {
        let content = (0..12)
            .map(|i| format!("Sentence number {} states the main point", i))
            .collect::<Vec<_>>()
            .join(". ");
        assert_eq!(page_points(&content).len(), 8);
    }

    #[test]
    fn test_summary_rendering() {
        let summary = generate_summary(&record(
            "\n--- PAGE 1 ---\nThe mission of this challenge is clear. \n",
            vec![OutlineEntry::new(HeadingLevel::H2, "Goals", 1)],
            1,
        ));

        let expected = "**Document Structure:**\n\
                        1. Goals (Page 1)\n\
                        \n\
                        **Key Points:**\n\
                        --- PAGE 1 ---\n\
                        • The mission of this challenge is clear.\n\
                        \n\
                        \n\
                        **Document Statistics:**\n\
                        • Total Pages: 1\n\
                        • Total Sections: 1\n\
                        • Document Type: Competition/Challenge Document\n";
        assert_eq!(summary.to_string(), expected);
    }

    #[test]
    fn test_summary_without_outline_or_markers() {
        let summary = generate_summary(&record(
            "An overview of the results we observed. ok. Nothing else to see here today.",
            vec![],
            0,
        ));

        assert!(summary.pages.is_empty());
        assert_eq!(summary.unpaged_points, vec!["An overview of the results we observed"]);
        assert_eq!(summary.total_pages, 1);

        let rendered = summary.to_string();
        assert!(!rendered.contains("**Document Structure:**"));
        assert!(rendered.starts_with("**Key Points:**\n• An overview of the results we observed.\n"));
        assert!(rendered.contains("• Total Sections: 0\n"));
        assert!(rendered.ends_with("• Document Type: General Document\n"));
    }
}
