//! Session controller.
//!
//! A [`Session`] holds at most one loaded [`DocumentRecord`]. Loading a new
//! document replaces the previous record; a failed load leaves it in place.
//! Analyses read the current record and return plain report data.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{generate_summary, is_summary_request, DocumentSummary, RelevanceScorer};
use crate::error::{Error, Result};
use crate::model::{DocumentRecord, ScoredSection};
use crate::parser::PageSource;
use crate::Pdfscope;

/// Ranked outline sections for a persona and job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceReport {
    pub filename: String,
    pub persona: String,
    pub job: String,
    pub generated_at: DateTime<Utc>,
    /// Keywords extracted from the query
    pub keywords: Vec<String>,
    /// Number of outline entries considered
    pub total_sections: usize,
    /// Matching sections, best first
    pub sections: Vec<ScoredSection>,
}

/// Summary digest produced when the job asks for a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub filename: String,
    pub persona: String,
    pub job: String,
    pub generated_at: DateTime<Utc>,
    pub summary: DocumentSummary,
}

/// Result of analyzing a document against a persona and job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Analysis {
    Relevance(RelevanceReport),
    Summary(SummaryReport),
}

impl Analysis {
    /// Whether this analysis is a summary digest.
    pub fn is_summary(&self) -> bool {
        matches!(self, Analysis::Summary(_))
    }

    /// File name of the analyzed document.
    pub fn filename(&self) -> &str {
        match self {
            Analysis::Relevance(r) => &r.filename,
            Analysis::Summary(s) => &s.filename,
        }
    }
}

/// Analyze a record against a persona and job description.
///
/// Blank persona or job yields [`Error::MissingQuery`]. Jobs that mention
/// "summarize" or "summary" produce a summary digest instead of a ranking.
pub fn analyze_record(
    record: &DocumentRecord,
    scorer: &RelevanceScorer,
    persona: &str,
    job: &str,
) -> Result<Analysis> {
    let persona = persona.trim();
    let job = job.trim();
    if persona.is_empty() || job.is_empty() {
        return Err(Error::MissingQuery);
    }

    let generated_at = Utc::now();

    if is_summary_request(job) {
        log::debug!("Summary requested for {}", record.filename);
        return Ok(Analysis::Summary(SummaryReport {
            filename: record.filename.clone(),
            persona: persona.to_string(),
            job: job.to_string(),
            generated_at,
            summary: generate_summary(record),
        }));
    }

    let keywords = scorer.keywords(persona, job);
    let sections = scorer.rank(&record.outline, &keywords);
    log::debug!(
        "{} of {} sections matched keywords {:?}",
        sections.len(),
        record.outline.len(),
        keywords
    );

    Ok(Analysis::Relevance(RelevanceReport {
        filename: record.filename.clone(),
        persona: persona.to_string(),
        job: job.to_string(),
        generated_at,
        keywords,
        total_sections: record.outline.len(),
        sections,
    }))
}

/// Owns the currently loaded document.
#[derive(Default)]
pub struct Session {
    scope: Pdfscope,
    record: Option<DocumentRecord>,
}

impl Session {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with custom settings.
    pub fn with_scope(scope: Pdfscope) -> Self {
        Self {
            scope,
            record: None,
        }
    }

    /// Load a PDF file, replacing the current document.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&DocumentRecord> {
        let record = self.scope.load_file(path)?;
        Ok(self.replace(record))
    }

    /// Load PDF bytes, replacing the current document.
    pub fn load_bytes(&mut self, filename: &str, data: &[u8]) -> Result<&DocumentRecord> {
        let record = self.scope.load_bytes(filename, data)?;
        Ok(self.replace(record))
    }

    /// Load from any page source, replacing the current document.
    pub fn load_source<S: PageSource + ?Sized>(&mut self, filename: &str, source: &S) -> &DocumentRecord {
        let record = self.scope.load_source(filename, source);
        self.replace(record)
    }

    fn replace(&mut self, record: DocumentRecord) -> &DocumentRecord {
        if let Some(previous) = &self.record {
            log::debug!("Replacing {} with {}", previous.filename, record.filename);
        }
        self.record.insert(record)
    }

    /// The loaded document, if any.
    pub fn record(&self) -> Option<&DocumentRecord> {
        self.record.as_ref()
    }

    /// Whether a document is loaded.
    pub fn is_loaded(&self) -> bool {
        self.record.is_some()
    }

    /// Drop the loaded document.
    pub fn clear(&mut self) -> Option<DocumentRecord> {
        self.record.take()
    }

    /// Analyze the loaded document.
    ///
    /// Returns [`Error::NoDocument`] when nothing is loaded.
    pub fn analyze(&self, persona: &str, job: &str) -> Result<Analysis> {
        let record = self.record.as_ref().ok_or(Error::NoDocument)?;
        self.scope.analyze(record, persona, job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentOutline, HeadingLevel, OutlineEntry};

    fn record() -> DocumentRecord {
        DocumentRecord::new(
            "plan.pdf",
            DocumentOutline::new(
                "Plan",
                vec![
                    OutlineEntry::new(HeadingLevel::H2, "Budget Overview", 1),
                    OutlineEntry::new(HeadingLevel::H2, "Team Roster", 2),
                ],
            ),
            "\n--- PAGE 1 ---\nThe main budget is fixed for the year. \n",
            2,
        )
    }

    #[test]
    fn test_missing_query() {
        let scorer = RelevanceScorer::new();
        for (persona, job) in [("", "review"), ("analyst", "   "), (" ", "")] {
            let err = analyze_record(&record(), &scorer, persona, job).unwrap_err();
            assert!(matches!(err, Error::MissingQuery));
        }
    }

    #[test]
    fn test_relevance_report() {
        let analysis =
            analyze_record(&record(), &RelevanceScorer::new(), "financial analyst", "review budget")
                .unwrap();

        match analysis {
            Analysis::Relevance(report) => {
                assert_eq!(report.filename, "plan.pdf");
                assert_eq!(report.total_sections, 2);
                assert_eq!(report.keywords, vec!["financial", "analyst", "review", "budget"]);
                assert_eq!(report.sections.len(), 1);
                assert_eq!(report.sections[0].text(), "Budget Overview");
            }
            other => panic!("expected relevance report, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_mode() {
        let analysis = analyze_record(
            &record(),
            &RelevanceScorer::new(),
            "budget analyst",
            "Please summarize this document",
        )
        .unwrap();

        assert!(analysis.is_summary());
        if let Analysis::Summary(report) = analysis {
            assert_eq!(report.summary.total_sections, 2);
            assert_eq!(report.summary.total_pages, 2);
        }
    }

    #[test]
    fn test_session_without_document() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(matches!(
            session.analyze("analyst", "review"),
            Err(Error::NoDocument)
        ));
    }

    #[test]
    fn test_failed_load_keeps_previous_record() {
        let mut session = Session::new();
        session.record = Some(record());

        assert!(session.load_bytes("broken.pdf", b"not a pdf").is_err());
        assert_eq!(session.record().map(|r| r.filename.as_str()), Some("plan.pdf"));

        assert!(session.clear().is_some());
        assert!(session.record().is_none());
    }

    #[test]
    fn test_analysis_serializes_mode_tag() {
        let analysis =
            analyze_record(&record(), &RelevanceScorer::new(), "analyst", "budget").unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["mode"], "relevance");
        assert_eq!(json["sections"][0]["text"], "Budget Overview");
        assert_eq!(json["sections"][0]["level"], "H2");
        assert_eq!(json["sections"][0]["score"], 1);
    }
}
