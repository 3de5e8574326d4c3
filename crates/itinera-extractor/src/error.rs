//! Error types for the LLM extractor

use itinera_parser::ParseError;
use thiserror::Error;

/// Errors that can occur during LLM-assisted extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// The model did not answer in time
    #[error("Extraction timeout")]
    Timeout,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The model reply is not a usable itinerary object
    #[error("Unparseable model response: {reason} (response starts: {preview:?})")]
    UpstreamParseFailure {
        /// What went wrong
        reason: String,
        /// Leading characters of the raw reply
        preview: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Attach the start of the raw reply to an upstream failure lacking one
    pub fn with_preview(self, raw: &str, max_chars: usize) -> Self {
        match self {
            ExtractorError::UpstreamParseFailure { reason, preview } if preview.is_empty() => {
                ExtractorError::UpstreamParseFailure {
                    reason,
                    preview: preview_of(raw, max_chars),
                }
            }
            other => other,
        }
    }
}

impl From<ParseError> for ExtractorError {
    fn from(e: ParseError) -> Self {
        ExtractorError::UpstreamParseFailure {
            reason: e.to_string(),
            preview: String::new(),
        }
    }
}

/// First `max_chars` characters of `raw`
pub fn preview_of(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}
