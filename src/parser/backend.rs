//! PDF engine abstraction layer.
//!
//! Provides a trait-based interface for page-level text extraction,
//! isolating the concrete PDF library (lopdf) from outline inference.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::content::{decode_text_simple, extract_fragments, ContentOp, PdfValue};
use super::header::check_header;
use crate::error::{Error, Result};
use crate::model::RawFragment;

/// Anything that can report the positioned text of numbered pages.
///
/// Pages are 1-indexed. A failure on one page must not affect others.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw text fragments of one page, in content-stream order.
    fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>> {
        (**self).text_fragments(page)
    }
}

impl<T: PageSource + ?Sized> PageSource for Box<T> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>> {
        (**self).text_fragments(page)
    }
}

/// Concrete [`PageSource`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let header = check_header(data)?;
        log::debug!("PDF header version {} at offset {}", header.version, header.offset);

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may be unreadable");
        }

        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// Load from a reader.
    pub fn load_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    /// Decompressed content stream bytes of a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without contents is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::TextExtract("Invalid content stream".to_string())),
            },
            Object::Stream(s) => Ok(stream_bytes(s)),
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::TextExtract("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, arr: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in arr {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
        }
        content
    }
}

impl PageSource for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn text_fragments(&self, page: u32) -> Result<Vec<RawFragment>> {
        let page_id = self.page_id(page)?;
        let ops = decode_content(&self.page_content(page_id)?)?;

        let font_dicts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let mut fonts = HashMap::with_capacity(font_dicts.len());
        let mut encodings = HashMap::with_capacity(font_dicts.len());
        for (name, dict) in &font_dicts {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
            fonts.insert(name.clone(), base_font);

            if let Ok(enc) = dict.get_font_encoding(&self.doc) {
                encodings.insert(name.as_slice(), enc);
            }
        }

        Ok(extract_fragments(&ops, &fonts, |font_key, bytes| {
            encodings
                .get(font_key)
                .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
                .unwrap_or_else(|| decode_text_simple(bytes))
        }))
    }
}

/// Stream content, decompressed when a filter applies.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Parse raw content stream bytes into engine-neutral operations.
fn decode_content(data: &[u8]) -> Result<Vec<ContentOp>> {
    let content =
        lopdf::content::Content::decode(data).map_err(|e| Error::TextExtract(e.to_string()))?;

    Ok(content
        .operations
        .into_iter()
        .map(|op| ContentOp {
            operands: op.operands.iter().map(convert_object).collect(),
            operator: op.operator,
        })
        .collect())
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
