//! Document analysis passes.
//!
//! Everything in here works on plain fragment and record data. The passes
//! never touch the PDF engine and never fail; degenerate input degrades to
//! empty output.

mod fulltext;
mod options;
mod outline;
mod relevance;
mod summary;

pub use fulltext::{
    page_marker, page_text, reading_order, reconstruct_full_text, reconstruct_full_text_with,
    LINE_TOLERANCE, PAGE_ERROR_PLACEHOLDER,
};
pub use options::{AnalysisConfig, OutlineConfig, RelevanceConfig};
pub use outline::{infer_outline, FontStatistics, HeadingSignals, OutlineInferrer};
pub use relevance::{extract_keywords, is_summary_request, score_relevance, RelevanceScorer};
pub use summary::{generate_summary, DocumentSummary, DocumentType, PagePoints};
