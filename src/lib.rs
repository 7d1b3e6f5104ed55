//! # pdfscope
//!
//! Heuristic outline inference and persona-driven section ranking for PDF
//! documents.
//!
//! The library pulls positioned text fragments out of every page, infers a
//! title and an H1/H2/H3 outline from typographic signals alone, rebuilds a
//! page-delimited full text, and ranks outline sections against a persona
//! and a job description.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfscope::{load_file, Session};
//!
//! fn main() -> pdfscope::Result<()> {
//!     let record = load_file("report.pdf")?;
//!     println!("Title: {}", record.outline.title);
//!     for entry in &record.outline.outline {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let mut session = Session::new();
//!     session.load_file("report.pdf")?;
//!     let analysis = session.analyze("financial analyst", "review the budget")?;
//!     println!("{}", pdfscope::render::to_json(&analysis, pdfscope::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline inference**: size, boldness, casing, numbering and punctuation signals
//! - **Full text**: reading-order reconstruction with page markers
//! - **Relevance ranking**: keyword overlap between headings and a query
//! - **Summary digest**: key sentences per page and document statistics
//! - **Pluggable engine**: any [`PageSource`] can feed the analysis passes
//! - **Parallel processing**: Uses Rayon for independent passes

pub mod analysis;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

pub use analysis::{
    AnalysisConfig, DocumentSummary, DocumentType, OutlineConfig, OutlineInferrer,
    RelevanceConfig, RelevanceScorer,
};
pub use error::{Error, Result};
pub use model::{
    DocumentOutline, DocumentRecord, HeadingLevel, OutlineEntry, PageFragments, RawFragment,
    ScoredSection, TextFragment,
};
pub use parser::{LopdfBackend, PageSelection, PageSource, ParseOptions};
pub use render::JsonFormat;
pub use session::{Analysis, RelevanceReport, Session, SummaryReport};

use std::path::Path;

use analysis::reconstruct_full_text_with;
use parser::{extract_pages, failed_pages};

/// Load a PDF file and build its document record.
///
/// # Example
///
/// ```no_run
/// use pdfscope::load_file;
///
/// let record = load_file("document.pdf").unwrap();
/// println!("Pages: {}", record.total_pages);
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<DocumentRecord> {
    Pdfscope::new().load_file(path)
}

/// Load a PDF from bytes.
///
/// # Example
///
/// ```no_run
/// use pdfscope::load_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let record = load_bytes("document.pdf", &data).unwrap();
/// ```
pub fn load_bytes(filename: &str, data: &[u8]) -> Result<DocumentRecord> {
    Pdfscope::new().load_bytes(filename, data)
}

/// Load a PDF file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn load_file_async<P: AsRef<Path>>(path: P) -> Result<DocumentRecord> {
    Pdfscope::new().load_file_async(path).await
}

/// Builder for loading and analyzing PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfscope::{OutlineConfig, PageSelection, Pdfscope};
///
/// let scope = Pdfscope::new()
///     .sequential()
///     .with_pages(PageSelection::Range(1..=10))
///     .with_outline_config(OutlineConfig::new().with_max_entries(20));
/// let record = scope.load_file("document.pdf")?;
/// let analysis = scope.analyze(&record, "student", "find the exam topics")?;
/// # Ok::<(), pdfscope::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pdfscope {
    parse_options: ParseOptions,
    outline: OutlineInferrer,
    relevance: RelevanceScorer,
}

impl Pdfscope {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set outline inference thresholds.
    pub fn with_outline_config(mut self, config: OutlineConfig) -> Self {
        self.outline = OutlineInferrer::with_config(config);
        self
    }

    /// Set keyword extraction limits.
    pub fn with_relevance_config(mut self, config: RelevanceConfig) -> Self {
        self.relevance = RelevanceScorer::with_config(config);
        self
    }

    /// Apply a combined analysis configuration.
    pub fn with_config(self, config: AnalysisConfig) -> Self {
        self.with_outline_config(config.outline)
            .with_relevance_config(config.relevance)
    }

    /// Get the parse options.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    /// Load a PDF file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentRecord> {
        let path = path.as_ref();
        let backend = LopdfBackend::load_file(path)?;
        Ok(self.load_source(&file_name(path), &backend))
    }

    /// Load a PDF from bytes.
    pub fn load_bytes(&self, filename: &str, data: &[u8]) -> Result<DocumentRecord> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(self.load_source(filename, &backend))
    }

    /// Load a PDF file on a blocking worker thread.
    #[cfg(feature = "async")]
    pub async fn load_file_async<P: AsRef<Path>>(&self, path: P) -> Result<DocumentRecord> {
        let path = path.as_ref();
        let filename = file_name(path);
        let data = tokio::fs::read(path).await?;
        let scope = self.clone();

        tokio::task::spawn_blocking(move || scope.load_bytes(&filename, &data))
            .await
            .map_err(|e| Error::Other(format!("Extraction task failed: {}", e)))?
    }

    /// Build a document record from any page source.
    ///
    /// Page failures are recovered, so this never fails; failed pages are
    /// listed in [`DocumentRecord::failed_pages`].
    pub fn load_source<S: PageSource + ?Sized>(&self, filename: &str, source: &S) -> DocumentRecord {
        let pages = extract_pages(source, &self.parse_options);
        let parallel = self.parse_options.parallel;

        let (outline, full_text) = if parallel {
            rayon::join(
                || self.outline.infer_pages(&pages, true),
                || reconstruct_full_text_with(&pages, true),
            )
        } else {
            (
                self.outline.infer_pages(&pages, false),
                reconstruct_full_text_with(&pages, false),
            )
        };

        let failed = failed_pages(&pages);
        log::info!(
            "Loaded {}: {} pages, {} outline entries, {} failed pages",
            filename,
            source.page_count(),
            outline.len(),
            failed.len()
        );

        DocumentRecord::new(filename, outline, full_text, source.page_count()).with_failed_pages(failed)
    }

    /// Analyze a record against a persona and job description.
    pub fn analyze(&self, record: &DocumentRecord, persona: &str, job: &str) -> Result<Analysis> {
        session::analyze_record(record, &self.relevance, persona, job)
    }

    /// Turn this configuration into an empty session.
    pub fn into_session(self) -> Session {
        Session::with_scope(self)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pages(Vec<PageFragments>);

    impl PageSource for Pages {
        fn page_count(&self) -> u32 {
            self.0.len() as u32
        }

        fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>> {
            let page = &self.0[page as usize - 1];
            match &page.failure {
                Some(message) => Err(Error::TextExtract(message.clone())),
                None => Ok(page.fragments.clone()),
            }
        }
    }

    fn source() -> Pages {
        Pages(vec![
            PageFragments::new(
                1,
                vec![
                    RawFragment::new("Field Guide", 28.0, "Helvetica-Bold", 72.0, 720.0),
                    RawFragment::new("1. Getting Started", 16.0, "Helvetica-Bold", 72.0, 680.0),
                    RawFragment::new("Unpack the kit and check every part.", 11.0, "Helvetica", 72.0, 660.0),
                ],
            ),
            PageFragments::failed(2, "corrupt"),
            PageFragments::new(
                3,
                vec![
                    RawFragment::new("2. Maintenance", 16.0, "Helvetica-Bold", 72.0, 720.0),
                    RawFragment::new("Oil the hinges once a month.", 11.0, "Helvetica", 72.0, 700.0),
                ],
            ),
        ])
    }

    #[test]
    fn test_builder() {
        let scope = Pdfscope::new()
            .sequential()
            .with_pages(PageSelection::Range(1..=5))
            .with_outline_config(OutlineConfig::new().with_max_entries(3));

        assert!(!scope.parse_options().parallel);
        assert_eq!(scope.parse_options().pages, PageSelection::Range(1..=5));
        assert_eq!(scope.outline.config().max_entries, 3);
    }

    #[test]
    fn test_load_source_parallel_matches_sequential() {
        let parallel = Pdfscope::new().load_source("guide.pdf", &source());
        let sequential = Pdfscope::new().sequential().load_source("guide.pdf", &source());
        assert_eq!(parallel, sequential);

        assert_eq!(parallel.outline.title, "Field Guide");
        assert_eq!(parallel.total_pages, 3);
        assert_eq!(parallel.failed_pages, vec![2]);
        assert!(parallel
            .full_text
            .contains("\n--- PAGE 2 ---\n[Error extracting content from this page]\n"));
    }

    #[test]
    fn test_load_bytes_invalid() {
        assert!(matches!(load_bytes("x.pdf", b""), Err(Error::UnknownFormat)));
        assert!(matches!(
            load_bytes("x.pdf", &[0xFF, 0xFE, 0x00, 0x01]),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_load_file_missing() {
        assert!(matches!(
            load_file("/nonexistent/missing.pdf"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/docs/report.pdf")), "report.pdf");
    }

    #[test]
    fn test_into_session() {
        let mut session = Pdfscope::new().sequential().into_session();
        session.load_source("guide.pdf", &source());
        let analysis = session.analyze("technician", "maintenance schedule").unwrap();
        match analysis {
            Analysis::Relevance(report) => {
                assert_eq!(report.sections.len(), 1);
                assert_eq!(report.sections[0].text(), "2. Maintenance");
            }
            other => panic!("unexpected analysis: {:?}", other),
        }
    }
}
