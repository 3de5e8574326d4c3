//! Line normalization - raw extracted text to trimmed, non-blank lines

use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-–—*•●○▪■◦·►▶➢➤✓✔]+\s*|\d{1,2}[.)]\s+|[a-zA-Z]\)\s+)").unwrap()
});

/// Split raw text into trimmed, non-blank lines
///
/// Accepts `\n`, `\r\n` and lone `\r` line endings. Empty input yields an
/// empty sequence.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r', '\u{2028}', '\u{2029}'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject text that cannot be extracted document content
///
/// Word-processor extraction sometimes hands over binary garbage; a NUL
/// byte is the reliable tell.
pub fn check_text(text: &str) -> Result<(), ParseError> {
    if let Some(pos) = text.find('\0') {
        return Err(ParseError::InvalidInput(format!(
            "binary content (NUL byte at offset {})",
            pos
        )));
    }
    Ok(())
}

/// Decode raw bytes as document text
pub fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ParseError::InvalidInput(format!("not UTF-8 text: {}", e))
    })?;
    check_text(text)?;
    Ok(text)
}

/// Cut text to at most `max_chars` characters on a char boundary
///
/// Returns the prefix and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Whether a line starts with a bullet or list-number marker
pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

/// Remove a leading bullet or list-number marker
pub fn strip_bullet(line: &str) -> &str {
    match BULLET_RE.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_blank_lines() {
        let lines = normalize_lines("  Title \r\n\r\n\t\nDay 1: Arrival\rOvernight at Goa\n");
        assert_eq!(lines, vec!["Title", "Day 1: Arrival", "Overnight at Goa"]);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines(" \n \n").is_empty());
    }

    #[test]
    fn test_check_text_rejects_nul() {
        assert!(check_text("plain text").is_ok());
        assert!(matches!(check_text("PK\0\u{3}"), Err(ParseError::InvalidInput(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode(&[0xff, 0xfe, 0x41]).is_err());
        assert_eq!(decode("Goa".as_bytes()).unwrap(), "Goa");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate_chars("héllo", 2), ("hé", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
    }

    #[test]
    fn test_strip_bullet_variants() {
        assert_eq!(strip_bullet("- Airport transfers"), "Airport transfers");
        assert_eq!(strip_bullet("• Daily breakfast"), "Daily breakfast");
        assert_eq!(strip_bullet("3. Visa fees"), "Visa fees");
        assert_eq!(strip_bullet("✔ Guide"), "Guide");
        assert_eq!(strip_bullet("Plain line"), "Plain line");
        assert!(is_bullet("* item"));
        assert!(!is_bullet("Check-in hotel"));
    }
}
