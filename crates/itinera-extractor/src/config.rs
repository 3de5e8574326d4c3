//! Configuration for the LLM extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the LLM extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single model call (seconds)
    pub extraction_timeout_secs: u64,

    /// Characters of a bad model reply kept in error reports
    pub response_preview_len: usize,

    /// Ask the provider for schema-constrained output
    pub structured_output: bool,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.response_preview_len == 0 {
            return Err("response_preview_len must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Aggressive preset: small documents, short timeout
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            extraction_timeout_secs: 60,
            ..Self::default()
        }
    }

    /// Lenient preset: long documents, patient timeout
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            extraction_timeout_secs: 300,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            extraction_timeout_secs: 120,
            response_preview_len: 200,
            structured_output: true,
        }
    }
}
