//! Itinera Extractor
//!
//! The model-assisted alternative to the heuristic parser.
//!
//! # Architecture
//!
//! ```text
//! text → prompt → LlmProvider → first balanced {…} → normalizer → ParseReport
//! ```
//!
//! The provider is synchronous and runs on a blocking task under
//! [`ExtractorConfig::extraction_timeout`]. A reply that holds no usable JSON
//! object is an [`ExtractorError::UpstreamParseFailure`] carrying the start of
//! the raw reply; it is never silently replaced by defaults.
//!
//! # Example
//!
//! ```
//! use itinera_extractor::{ExtractorConfig, LlmExtractor};
//! use itinera_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"Here you go: {"title": "Nile Cruise", "nights": 4}"#);
//! let extractor = LlmExtractor::new(llm, ExtractorConfig::default())?;
//!
//! let report = extractor.extract("Nile Cruise\n4 Nights").await?;
//! assert_eq!(report.itinerary.slug, "nile-cruise-5d4n");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod prompt;
mod response;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::LlmExtractor;
pub use prompt::{PromptBuilder, ITINERARY_SCHEMA};
pub use response::{locate_json, parse_reply, JsonSpan};
