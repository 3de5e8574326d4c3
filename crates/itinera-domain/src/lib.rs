//! Itinera Domain Layer
//!
//! The canonical itinerary schema shared by every extraction strategy.
//! Both the heuristic parser and the LLM-assisted extractor produce exactly
//! these types, so their outputs are shape-compatible by construction.
//!
//! ## Key Concepts
//!
//! - **ParsedItinerary**: The root record handed to persistence and display
//! - **DayEntry**: One day of the itinerary, in document order
//! - **Activity**: A named activity with a closed [`ActivityType`] taxonomy
//! - **StayDuration**: A nights/days pair with its canonical display label
//! - **ParseReport**: The record plus the non-fatal warnings of one parse
//!
//! ## Architecture
//!
//! This crate holds no parsing logic. It depends only on `serde` (the record
//! must serialize to JSON without omissions) and `uuid` (parse identifiers).
//! Trait definitions for external collaborators live in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activity;
pub mod duration;
pub mod itinerary;
pub mod meal;
pub mod render;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use activity::{Activity, ActivityType};
pub use duration::StayDuration;
pub use itinerary::{DayEntry, ParsedItinerary, Route};
pub use meal::Meal;
pub use report::{ExtractionFailure, ParseId, ParseMetadata, ParseReport, Strategy};
