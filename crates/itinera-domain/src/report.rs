//! Parse reports - an itinerary plus what went wrong while building it

use crate::ParsedItinerary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one parse invocation, based on UUIDv7
///
/// Only used to correlate log lines and warnings of a single run; it is
/// never part of the itinerary record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParseId(u128);

impl ParseId {
    /// Generate a new UUIDv7-based ParseId
    ///
    /// # Examples
    ///
    /// ```
    /// use itinera_domain::ParseId;
    ///
    /// let id = ParseId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ParseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for ParseId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which pipeline produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// The rule-based text parser
    Heuristic,
    /// A language model followed by normalization
    Llm,
}

impl Strategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Heuristic => "heuristic",
            Strategy::Llm => "llm",
        }
    }
}

/// A recovered, non-fatal failure to extract one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// Day the failure belongs to, `None` for document-level fields
    pub day: Option<u32>,

    /// Name of the field that fell back to its default
    pub field: String,

    /// What went wrong
    pub reason: String,
}

impl ExtractionFailure {
    /// Failure on a document-level field
    pub fn document(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            day: None,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Failure on a field of one day
    pub fn day(day: u32, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            day: Some(day),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "day {}: {}: {}", day, self.field, self.reason),
            None => write!(f, "{}: {}", self.field, self.reason),
        }
    }
}

/// Metadata about a parse
#[derive(Debug, Clone, Serialize)]
pub struct ParseMetadata {
    /// Pipeline that produced the record
    pub strategy: Strategy,

    /// Non-blank lines seen by the parser (0 for the LLM path)
    pub line_count: usize,

    /// Days in the resulting record
    pub day_count: usize,

    /// Whether the input was cut to the configured maximum length
    pub truncated: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result of parsing one document
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Identifier of this run
    pub parse_id: ParseId,

    /// The structured record
    pub itinerary: ParsedItinerary,

    /// Fields that fell back to defaults
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the run
    pub metadata: ParseMetadata,
}

impl ParseReport {
    /// Whether every field was extracted without a recovered failure
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_are_ordered() {
        let first = ParseId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = ParseId::new();
        assert!(first < second);
    }

    #[test]
    fn test_failure_display() {
        let failure = ExtractionFailure::day(3, "route", "no capitalized place");
        assert_eq!(failure.to_string(), "day 3: route: no capitalized place");

        let failure = ExtractionFailure::document("nights", "not a number");
        assert_eq!(failure.to_string(), "nights: not a number");
    }
}
