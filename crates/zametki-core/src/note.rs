//! Note model and input validation

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::Result;

/// Maximum note length in characters, after trimming.
pub const MAX_TEXT_LEN: usize = 280;

/// Display-only timestamp format; regenerated on every edit.
const DATE_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Millisecond-timestamp id, unique and monotonic by creation time.
    pub id: i64,
    pub text: String,
    pub date: String,
    #[serde(
        rename = "ownerId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<String>,
}

impl Note {
    /// The caller is responsible for id uniqueness and validated text.
    pub(crate) fn new(id: i64, text: String, owner_id: Option<String>) -> Self {
        Self {
            id,
            text,
            date: current_date(),
            owner_id,
        }
    }

    /// Replace the text and refresh the display date. Id and owner never
    /// change after creation.
    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.date = current_date();
    }
}

fn current_date() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Trim and length-check raw input. Both the add and edit paths go through
/// here, so the length invariant holds for every stored note.
pub fn validate_text(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CoreError::EmptyText);
    }

    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(CoreError::TextTooLong { len });
    }

    Ok(text.to_string())
}

/// Characters left before the limit; negative once the input is over it.
/// Intended for UI character counters.
pub fn chars_remaining(text: &str) -> i64 {
    MAX_TEXT_LEN as i64 - text.chars().count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims() {
        assert_eq!(validate_text("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_rejects_empty_and_whitespace() {
        assert!(matches!(validate_text("").unwrap_err(), CoreError::EmptyText));
        assert!(matches!(
            validate_text("   ").unwrap_err(),
            CoreError::EmptyText
        ));
    }

    #[test]
    fn test_validate_length_boundary() {
        let at_limit = "a".repeat(MAX_TEXT_LEN);
        assert_eq!(validate_text(&at_limit).unwrap(), at_limit);

        let over_limit = "a".repeat(MAX_TEXT_LEN + 1);
        assert!(matches!(
            validate_text(&over_limit).unwrap_err(),
            CoreError::TextTooLong { len } if len == MAX_TEXT_LEN + 1
        ));
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        // 280 multi-byte characters are still within the limit
        let cyrillic = "ж".repeat(MAX_TEXT_LEN);
        assert!(validate_text(&cyrillic).is_ok());
    }

    #[test]
    fn test_chars_remaining() {
        assert_eq!(chars_remaining(""), 280);
        assert_eq!(chars_remaining("abc"), 277);
        assert_eq!(chars_remaining(&"a".repeat(300)), -20);
    }

    #[test]
    fn test_owner_id_omitted_when_absent() {
        let note = Note::new(1, "hi".to_string(), None);
        let json = serde_json::to_string(&note).unwrap();
        assert!(!json.contains("ownerId"));

        let owned = Note::new(2, "hi".to_string(), Some("42".to_string()));
        let json = serde_json::to_string(&owned).unwrap();
        assert!(json.contains(r#""ownerId":"42""#));
    }
}
