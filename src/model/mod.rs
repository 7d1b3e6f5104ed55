//! Document model types.
//!
//! Plain data shared by the parser, the analysis passes and the renderers.
//! Nothing in here performs I/O or formatting.

mod document;
mod fragment;
mod outline;

pub use document::DocumentRecord;
pub use fragment::{is_bold_font, round_size, PageFragments, RawFragment, TextFragment};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry, ScoredSection};
