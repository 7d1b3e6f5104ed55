//! JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any record, outline or analysis to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentOutline, DocumentRecord, HeadingLevel, OutlineEntry};

    fn record() -> DocumentRecord {
        DocumentRecord::new(
            "test.pdf",
            DocumentOutline::new("Test", vec![OutlineEntry::new(HeadingLevel::H1, "Intro", 1)]),
            "\n--- PAGE 1 ---\nIntro \n",
            1,
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&record(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Test\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&record().outline, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Test","outline":[{"level":"H1","text":"Intro","page":1}]}"#
        );
    }
}
