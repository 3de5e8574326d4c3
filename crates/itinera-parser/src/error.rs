//! Error types for the parser

use thiserror::Error;

/// Errors that abort a whole parse
///
/// Failures inside a single field extractor are never reported through this
/// type; they are recovered and recorded as
/// [`ExtractionFailure`](itinera_domain::ExtractionFailure) warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input that cannot be treated as document text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Text exceeds maximum length and the policy is to reject it
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
