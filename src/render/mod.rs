//! Rendering module for presenting records and analyses.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{analysis_to_text, outline_to_text, relevance_to_text, summary_to_text};
