//! Page-by-page fragment collection.

use rayon::prelude::*;

use super::backend::PageSource;
use super::options::ParseOptions;
use crate::model::{PageFragments, TextFragment};

/// Pull raw fragments out of every selected page.
///
/// A page that fails is logged and recorded as failed; the remaining pages
/// are still extracted.
pub fn extract_pages<S: PageSource + ?Sized>(source: &S, options: &ParseOptions) -> Vec<PageFragments> {
    let page_count = source.page_count();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page in (1..=page_count).filter(|p| options.pages.includes(*p)) {
        match source.text_fragments(page) {
            Ok(fragments) => {
                log::trace!("Page {}: {} fragments", page, fragments.len());
                pages.push(PageFragments::new(page, fragments));
            }
            Err(e) => {
                log::warn!("Failed to extract page {}: {}", page, e);
                pages.push(PageFragments::failed(page, e.to_string()));
            }
        }
    }

    pages
}

/// Normalize raw fragments into the flat inference stream, in page order.
pub fn collect_fragments(pages: &[PageFragments], parallel: bool) -> Vec<TextFragment> {
    let normalize = |page: &PageFragments| -> Vec<TextFragment> {
        page.fragments
            .iter()
            .filter_map(|raw| TextFragment::from_raw(raw, page.page))
            .collect()
    };

    if parallel {
        pages.par_iter().map(normalize).flatten().collect()
    } else {
        pages.iter().flat_map(normalize).collect()
    }
}

/// Page numbers whose extraction failed.
pub fn failed_pages(pages: &[PageFragments]) -> Vec<u32> {
    pages
        .iter()
        .filter(|p| p.is_failed())
        .map(|p| p.page)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::RawFragment;
    use crate::parser::PageSelection;

    struct MockSource {
        pages: Vec<Vec<RawFragment>>,
        broken: Vec<u32>,
    }

    impl PageSource for MockSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>> {
            if self.broken.contains(&page) {
                return Err(Error::TextExtract("corrupt stream".into()));
            }
            Ok(self.pages[page as usize - 1].clone())
        }
    }

    fn source() -> MockSource {
        MockSource {
            pages: vec![
                vec![
                    RawFragment::new("Title Page", 24.0, "Arial-Bold", 72.0, 700.0),
                    RawFragment::new("x", 12.0, "Arial", 72.0, 680.0),
                ],
                vec![RawFragment::new("lost", 12.0, "Arial", 72.0, 700.0)],
                vec![RawFragment::new("  Closing words ", 12.0, "Arial", 72.0, 700.0)],
            ],
            broken: vec![2],
        }
    }

    #[test]
    fn test_failed_page_does_not_stop_extraction() {
        let pages = extract_pages(&source(), &ParseOptions::default());

        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_failed());
        assert_eq!(pages[2].fragments.len(), 1);
        assert_eq!(failed_pages(&pages), vec![2]);
    }

    #[test]
    fn test_page_selection_respected() {
        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![1, 3]));
        let pages = extract_pages(&source(), &options);

        let numbers: Vec<u32> = pages.iter().map(|p| p.page).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_collect_fragments_keeps_page_order() {
        let pages = extract_pages(&source(), &ParseOptions::default());

        for parallel in [true, false] {
            let fragments = collect_fragments(&pages, parallel);
            let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
            assert_eq!(texts, vec!["Title Page", "Closing words"]);
            assert_eq!(fragments[1].page, 3);
        }
    }
}
