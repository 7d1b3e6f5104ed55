//! PDF parsing module.
//!
//! Turns a PDF into per-page lists of positioned text fragments. The
//! [`PageSource`] trait is the only seam the analysis passes see.

mod backend;
mod collector;
mod content;
mod header;
mod options;

pub use backend::{LopdfBackend, PageSource};
pub use collector::{collect_fragments, extract_pages, failed_pages};
pub use content::{decode_text_simple, extract_fragments, ContentOp, PdfValue};
pub use header::{check_header, is_pdf_bytes, PdfHeader};
pub use options::{PageSelection, ParseOptions};
