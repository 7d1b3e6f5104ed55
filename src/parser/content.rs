//! Content-stream interpretation.
//!
//! Walks the text operators of a page's content stream and reports every
//! shown string as a [`RawFragment`] carrying its combined transform, glyph
//! height and font name. Operands are engine-neutral [`PdfValue`]s so the
//! interpreter can be driven without a real document.

use std::collections::HashMap;

use crate::model::RawFragment;

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value, if the operand is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(PdfValue::as_number)
    }
}

/// TJ adjustments beyond this many thousandths of an em read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn from_op(op: &ContentOp) -> Option<Self> {
        let mut m = [0.0; 6];
        for (i, slot) in m.iter_mut().enumerate() {
            *slot = op.number(i)?;
        }
        Some(Matrix(m))
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    /// Vertical scale of the matrix.
    fn vertical_scale(&self) -> f32 {
        self.0[2].hypot(self.0[3])
    }
}

/// Text state tracked across a content stream.
struct TextState {
    ctm: Matrix,
    saved_ctm: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    in_text_object: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            saved_ctm: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            in_text_object: false,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn fragment(&self, text: String) -> RawFragment {
        let combined = self.text_matrix.multiply(&self.ctm);
        RawFragment {
            text,
            height: self.font_size * combined.vertical_scale(),
            font_name: self.font_name.clone(),
            transform: combined.0,
        }
    }
}

/// Interpret content operations into raw fragments.
///
/// `fonts` maps font resource names to base font names; `decode` turns the
/// bytes of a shown string into text for the given font resource.
///
/// Glyph widths are not known here, so showing a string does not advance the
/// text matrix. Consecutive `Tj`/`TJ` shows on one line share one origin and
/// keep content-stream order when lines are rebuilt.
pub fn extract_fragments<F>(
    ops: &[ContentOp],
    fonts: &HashMap<Vec<u8>, String>,
    mut decode: F,
) -> Vec<RawFragment>
where
    F: FnMut(&[u8], &[u8]) -> String,
{
    let mut state = TextState::default();
    let mut fragments = Vec::new();

    for op in ops {
        match op.operator.as_str() {
            "q" => state.saved_ctm.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.saved_ctm.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_op(op) {
                    state.ctm = m.multiply(&state.ctm);
                }
            }
            "BT" => {
                state.in_text_object = true;
                state.text_matrix = Matrix::IDENTITY;
                state.line_matrix = Matrix::IDENTITY;
            }
            "ET" => state.in_text_object = false,
            "Tf" => {
                if let Some(PdfValue::Name(key)) = op.operands.first() {
                    state.font_name = fonts
                        .get(key)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                    state.font_key = key.clone();
                }
                if let Some(size) = op.number(1) {
                    state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = op.number(0) {
                    state.leading = leading;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.leading = -ty;
                    state.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_op(op) {
                    state.text_matrix = m;
                    state.line_matrix = m;
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = decode(state.font_key.as_slice(), bytes);
                    push_fragment(&state, text, &mut fragments);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = decode_tj_array(items, |bytes| decode(state.font_key.as_slice(), bytes));
                    push_fragment(&state, text, &mut fragments);
                }
            }
            "'" | "\"" => {
                state.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                    let text = decode(state.font_key.as_slice(), bytes);
                    push_fragment(&state, text, &mut fragments);
                }
            }
            _ => {}
        }
    }

    fragments
}

fn push_fragment(state: &TextState, text: String, fragments: &mut Vec<RawFragment>) {
    if state.in_text_object && !text.trim().is_empty() {
        fragments.push(state.fragment(text));
    }
}

/// Join the strings of a TJ array, turning large negative adjustments into spaces.
fn decode_tj_array<F>(items: &[PdfValue], mut decode: F) -> String
where
    F: FnMut(&[u8]) -> String,
{
    let mut combined = String::new();

    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -item.as_number().unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD && needs_word_space(&combined) {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }

    combined
}

fn needs_word_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Check if a character is from a script that doesn't use word spaces.
///
/// Chinese and Japanese don't use spaces between words, Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        // Hiragana, Katakana
        || (0x3040..=0x30FF).contains(&code)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<PdfValue>) -> ContentOp {
        ContentOp::new(operator, operands)
    }

    fn num(v: f32) -> PdfValue {
        PdfValue::Real(v)
    }

    fn tf(font: &[u8], size: f32) -> ContentOp {
        op("Tf", vec![PdfValue::Name(font.to_vec()), num(size)])
    }

    fn tj(text: &str) -> ContentOp {
        op("Tj", vec![PdfValue::Str(text.as_bytes().to_vec())])
    }

    fn fonts() -> HashMap<Vec<u8>, String> {
        let mut fonts = HashMap::new();
        fonts.insert(b"F1".to_vec(), "Helvetica".to_string());
        fonts.insert(b"F2".to_vec(), "Helvetica-Bold".to_string());
        fonts
    }

    fn run(ops: &[ContentOp]) -> Vec<RawFragment> {
        extract_fragments(ops, &fonts(), |_, bytes| decode_text_simple(bytes))
    }

    #[test]
    fn test_simple_tj_with_tm() {
        let fragments = run(&[
            op("BT", vec![]),
            tf(b"F2", 18.0),
            op("Tm", vec![num(1.0), num(0.0), num(0.0), num(1.0), num(72.0), num(700.0)]),
            tj("Introduction"),
            op("ET", vec![]),
        ]);

        assert_eq!(fragments.len(), 1);
        let f = &fragments[0];
        assert_eq!(f.text, "Introduction");
        assert_eq!(f.font_name, "Helvetica-Bold");
        assert!((f.height - 18.0).abs() < 0.01);
        assert!((f.x() - 72.0).abs() < 0.01);
        assert!((f.y() - 700.0).abs() < 0.01);
    }

    #[test]
    fn test_td_accumulates_and_tstar_uses_leading() {
        let fragments = run(&[
            op("BT", vec![]),
            tf(b"F1", 10.0),
            op("Td", vec![num(50.0), num(600.0)]),
            tj("first"),
            op("TL", vec![num(14.0)]),
            op("T*", vec![]),
            tj("second"),
            op("TD", vec![num(10.0), num(-20.0)]),
            tj("third"),
            op("ET", vec![]),
        ]);

        let positions: Vec<(f32, f32)> = fragments.iter().map(|f| (f.x(), f.y())).collect();
        assert_eq!(positions, vec![(50.0, 600.0), (50.0, 586.0), (60.0, 566.0)]);
    }

    #[test]
    fn test_consecutive_shows_share_origin() {
        let fragments = run(&[
            op("BT", vec![]),
            tf(b"F1", 10.0),
            op("Td", vec![num(72.0), num(500.0)]),
            tj("Total:"),
            tj("42"),
            op("TJ", vec![PdfValue::Array(vec![PdfValue::Str(b"units".to_vec())])]),
            op("ET", vec![]),
        ]);

        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Total:", "42", "units"]);
        assert!(fragments.iter().all(|f| f.x() == 72.0 && f.y() == 500.0));
    }

    #[test]
    fn test_quote_operator_moves_to_next_line() {
        let fragments = run(&[
            op("BT", vec![]),
            tf(b"F1", 10.0),
            op("TD", vec![num(0.0), num(-12.0)]),
            op("'", vec![PdfValue::Str(b"line".to_vec())]),
            op(
                "\"",
                vec![num(0.0), num(0.0), PdfValue::Str(b"spaced".to_vec())],
            ),
            op("ET", vec![]),
        ]);

        assert_eq!(fragments.len(), 2);
        assert!((fragments[0].y() + 24.0).abs() < 0.01);
        assert!((fragments[1].y() + 36.0).abs() < 0.01);
        assert_eq!(fragments[1].text, "spaced");
    }

    #[test]
    fn test_cm_scales_height_and_position() {
        let fragments = run(&[
            op("q", vec![]),
            op("cm", vec![num(2.0), num(0.0), num(0.0), num(2.0), num(10.0), num(20.0)]),
            op("BT", vec![]),
            tf(b"F1", 9.0),
            op("Td", vec![num(5.0), num(5.0)]),
            tj("scaled"),
            op("ET", vec![]),
            op("Q", vec![]),
            op("BT", vec![]),
            tf(b"F1", 9.0),
            tj("plain"),
            op("ET", vec![]),
        ]);

        assert!((fragments[0].height - 18.0).abs() < 0.01);
        assert!((fragments[0].x() - 20.0).abs() < 0.01);
        assert!((fragments[0].y() - 30.0).abs() < 0.01);
        assert!((fragments[1].height - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_tj_array_inserts_word_spaces() {
        let fragments = run(&[
            op("BT", vec![]),
            tf(b"F1", 12.0),
            op(
                "TJ",
                vec![PdfValue::Array(vec![
                    PdfValue::Str(b"Budget".to_vec()),
                    PdfValue::Integer(-250),
                    PdfValue::Str(b"Over".to_vec()),
                    PdfValue::Integer(-20),
                    PdfValue::Str(b"view".to_vec()),
                ])],
            ),
            op("ET", vec![]),
        ]);

        assert_eq!(fragments[0].text, "Budget Overview");
    }

    #[test]
    fn test_text_outside_bt_and_blank_text_ignored() {
        let fragments = run(&[
            tj("stray"),
            op("BT", vec![]),
            tf(b"F1", 12.0),
            tj("   "),
            op("ET", vec![]),
        ]);
        assert!(fragments.is_empty());
    }

    #[test]
    fn test_unknown_font_uses_resource_name() {
        let fragments = run(&[op("BT", vec![]), tf(b"F9", 12.0), tj("x1"), op("ET", vec![])]);
        assert_eq!(fragments[0].font_name, "F9");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('か'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
