//! Page-delimited full-text reconstruction.

use rayon::prelude::*;

use crate::model::{PageFragments, RawFragment};

/// Baselines closer than this share a line.
pub const LINE_TOLERANCE: f32 = 5.0;

/// Body written for a page whose extraction failed.
pub const PAGE_ERROR_PLACEHOLDER: &str = "[Error extracting content from this page]";

/// Marker line that opens every page section.
pub fn page_marker(page: u32) -> String {
    format!("--- PAGE {} ---", page)
}

/// Order fragments top-to-bottom, then left-to-right within a line.
///
/// Fragments are bucketed into lines by baseline: a fragment joins the
/// current line while it sits within [`LINE_TOLERANCE`] of the line's
/// highest baseline. Blank fragments are dropped.
pub fn reading_order(fragments: &[RawFragment]) -> Vec<&RawFragment> {
    let mut by_y: Vec<&RawFragment> = fragments
        .iter()
        .filter(|f| !f.text.trim().is_empty())
        .collect();
    by_y.sort_by(|a, b| b.y().total_cmp(&a.y()));

    let mut ordered = Vec::with_capacity(by_y.len());
    let mut line: Vec<&RawFragment> = Vec::new();
    let mut anchor = f32::INFINITY;

    for fragment in by_y {
        if !line.is_empty() && anchor - fragment.y() > LINE_TOLERANCE {
            flush_line(&mut line, &mut ordered);
        }
        if line.is_empty() {
            anchor = fragment.y();
        }
        line.push(fragment);
    }
    flush_line(&mut line, &mut ordered);

    ordered
}

fn flush_line<'a>(line: &mut Vec<&'a RawFragment>, ordered: &mut Vec<&'a RawFragment>) {
    line.sort_by(|a, b| a.x().total_cmp(&b.x()));
    ordered.append(line);
}

/// Text section contributed by one page, marker included.
pub fn page_text(page: &PageFragments) -> String {
    let mut text = format!("\n{}\n", page_marker(page.page));

    if page.is_failed() {
        text.push_str(PAGE_ERROR_PLACEHOLDER);
        text.push('\n');
        return text;
    }

    for fragment in reading_order(&page.fragments) {
        text.push_str(fragment.text.trim());
        text.push(' ');
    }
    text.push('\n');
    text
}

/// Concatenate the page sections of every page, in page order.
pub fn reconstruct_full_text(pages: &[PageFragments]) -> String {
    reconstruct_full_text_with(pages, false)
}

/// Like [`reconstruct_full_text`], optionally ordering pages in parallel.
pub fn reconstruct_full_text_with(pages: &[PageFragments], parallel: bool) -> String {
    if parallel {
        pages.par_iter().map(page_text).collect::<Vec<_>>().concat()
    } else {
        pages.iter().map(page_text).collect()
    }
}
