//! Locating and repairing the JSON object in a model reply
//!
//! Models wrap their answer in prose or markdown fences and sometimes stop
//! before closing every brace. The first `{` opens the candidate span; braces
//! inside string literals (including escaped quotes) do not count. A span
//! still open at the end of the reply is closed with one `}` per open brace.

use crate::error::{preview_of, ExtractorError};
use serde_json::Value;
use tracing::debug;

/// The candidate JSON text found in a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSpan {
    /// Text of the object, closing braces appended when it was cut off
    pub text: String,

    /// Braces that had to be appended
    pub closed: usize,
}

/// Find the first balanced `{...}` span, auto-closing an unterminated one
pub fn locate_json(reply: &str) -> Option<JsonSpan> {
    let start = reply.find('{')?;
    let body = &reply[start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(JsonSpan {
                        text: body[..=i].to_string(),
                        closed: 0,
                    });
                }
            }
            _ => {}
        }
    }

    let mut text = body.trim_end().to_string();
    text.push_str(&"}".repeat(depth));
    Some(JsonSpan { text, closed: depth })
}

/// Extract and parse the JSON object from a model reply
pub fn parse_reply(reply: &str, preview_len: usize) -> Result<Value, ExtractorError> {
    let failure = |reason: String| ExtractorError::UpstreamParseFailure {
        reason,
        preview: preview_of(reply, preview_len),
    };

    let span = locate_json(reply).ok_or_else(|| failure("no JSON object in response".to_string()))?;
    if span.closed > 0 {
        debug!("Auto-closed {} unterminated braces in model reply", span.closed);
    }

    serde_json::from_str(&span.text).map_err(|e| failure(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_object() {
        let span = locate_json(r#"{"title": "Nile"}"#).unwrap();
        assert_eq!(span.text, r#"{"title": "Nile"}"#);
        assert_eq!(span.closed, 0);
    }

    #[test]
    fn test_prose_and_fences_around_object() {
        let reply = "Sure! Here it is:\n```json\n{\"title\": \"Nile\", \"days\": 5}\n```\nAnything else? {}";
        assert_eq!(parse_reply(reply, 200).unwrap(), json!({"title": "Nile", "days": 5}));
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let reply = r#"{"title": "Curly } trip", "note": "say \"{hi}\"", "x": {"y": 1}} trailing }"#;
        let value = parse_reply(reply, 200).unwrap();
        assert_eq!(value["title"], "Curly } trip");
        assert_eq!(value["x"]["y"], 1);
    }

    #[test]
    fn test_unterminated_object_is_closed() {
        let reply = r#"{"title": "Nile", "itinerary": [{"day_number": 1, "meals": ["lunch"]"#;
        let span = locate_json(reply).unwrap();
        assert_eq!(span.closed, 2);
        // The open array is left as is, so this one still fails to parse.
        assert!(parse_reply(reply, 200).is_err());

        let reply = r#"{"title": "Nile", "extra": {"k": 1"#;
        assert_eq!(
            parse_reply(reply, 200).unwrap(),
            json!({"title": "Nile", "extra": {"k": 1}})
        );
    }

    #[test]
    fn test_no_object() {
        let err = parse_reply("I cannot help with that.", 8).unwrap_err();
        assert_eq!(
            err,
            ExtractorError::UpstreamParseFailure {
                reason: "no JSON object in response".to_string(),
                preview: "I cannot".to_string(),
            }
        );
    }
}
