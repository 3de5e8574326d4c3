//! Itinera Parser
//!
//! Heuristic extraction of structured itineraries from free-form travel
//! documents.
//!
//! # Pipeline
//!
//! ```text
//! text → lines → segmenter ─┬→ title / duration / description
//!                           ├→ includes / excludes / highlights
//!                           └→ day blocks → field pipeline
//!      → highlight backfill → post-processing → ParsedItinerary
//! ```
//!
//! The segmenter is an explicit state machine over the sections
//! `general | includes | excludes | highlights | itinerary`. Each day is
//! flushed through a pipeline of independent field extractors (activities,
//! meals, route, overnight); a failing or panicking extractor costs only its
//! own field and is reported in [`ParseReport::failures`].
//!
//! [`normalize`] applies the same defaulting rules to itinerary objects
//! produced elsewhere, such as a language model.
//!
//! # Example
//!
//! ```
//! use itinera_parser::ItineraryParser;
//!
//! let text = "Bali Escape\n5 Days / 4 Nights\nDay 1: Arrival in Bali\nOvernight at Ubud.";
//! let report = ItineraryParser::default().parse(text).unwrap();
//!
//! assert_eq!(report.itinerary.slug, "bali-escape-5d4n");
//! assert_eq!(report.itinerary.itinerary[0].overnight.as_deref(), Some("Ubud"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod day;
mod error;
mod highlights;
mod parser;

pub mod duration;
pub mod extract;
pub mod lines;
pub mod normalize;
pub mod postprocess;
pub mod segmenter;

#[cfg(test)]
mod tests;

pub use config::{OversizePolicy, ParserConfig};
pub use error::ParseError;
pub use extract::{ExtractError, Field, FieldPipeline, FieldValue};
pub use highlights::backfill;
pub use normalize::{normalize, Normalized};
pub use parser::ItineraryParser;

// Re-export the record types so callers need only this crate
pub use itinera_domain::{ParseReport, ParsedItinerary};
