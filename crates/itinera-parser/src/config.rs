//! Configuration for the heuristic parser

use crate::postprocess::DOMESTIC_GAZETTEER;
use serde::{Deserialize, Serialize};

/// What to do with documents longer than `max_input_length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Cut the text at the limit and parse the prefix
    Truncate,
    /// Fail the parse with `TextTooLong`
    Reject,
}

impl Default for OversizePolicy {
    fn default() -> Self {
        OversizePolicy::Truncate
    }
}

/// Configuration for the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum input text length (characters)
    pub max_input_length: usize,

    /// Handling of input above `max_input_length`
    pub oversize_policy: OversizePolicy,

    /// Number of leading lines the duration parser is tried against
    pub duration_scan_lines: usize,

    /// Cultural/sightseeing activities taken when highlights are backfilled
    pub highlight_fallback_limit: usize,

    /// Activity names longer than this (characters) are discarded
    pub max_activity_name_len: usize,

    /// Lower-case place names that mark a trip as domestic
    pub domestic_places: Vec<String>,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        if self.duration_scan_lines == 0 {
            return Err("duration_scan_lines must be greater than 0".to_string());
        }
        if self.max_activity_name_len < 3 {
            return Err("max_activity_name_len must be at least 3".to_string());
        }
        if self.domestic_places.iter().any(|p| p.trim().is_empty()) {
            return Err("domestic_places cannot contain empty names".to_string());
        }
        Ok(())
    }

    /// Strict preset: reject oversized input, look for the duration only near the top
    pub fn strict() -> Self {
        Self {
            max_input_length: 50_000,
            oversize_policy: OversizePolicy::Reject,
            duration_scan_lines: 3,
            highlight_fallback_limit: 3,
            max_activity_name_len: 60,
            ..Self::default()
        }
    }

    /// Lenient preset: accept long documents, scan further for the duration
    pub fn lenient() -> Self {
        Self {
            max_input_length: 1_000_000,
            oversize_policy: OversizePolicy::Truncate,
            duration_scan_lines: 20,
            highlight_fallback_limit: 8,
            max_activity_name_len: 120,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_length: 200_000,
            oversize_policy: OversizePolicy::Truncate,
            duration_scan_lines: 8,
            highlight_fallback_limit: 5,
            max_activity_name_len: 80,
            domestic_places: DOMESTIC_GAZETTEER.iter().map(|p| p.to_string()).collect(),
        }
    }
}
