//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Heuristic parse rejected the document
    #[error("Parse error: {0}")]
    Parse(#[from] itinera_parser::ParseError),

    /// LLM-assisted extraction failed
    #[error("Extraction error: {0}")]
    Extractor(#[from] itinera_extractor::ExtractorError),

    /// LLM provider could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] itinera_llm::LlmError),
}
