//! Field sub-extractors and the fault-isolating pipeline that runs them
//!
//! Every field of a day is produced by an independent extractor. The
//! pipeline invokes each one through [`isolate`], which turns an `Err` or a
//! panic into "no value" plus an [`ExtractionFailure`] warning, so one
//! broken field never empties its siblings or aborts other days.

pub mod activities;
pub mod meals;
pub mod overnight;
pub mod route;

use itinera_domain::{Activity, DayEntry, ExtractionFailure, Meal, Route};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::warn;

/// Errors raised inside a single field extractor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Text the extractor refuses to process
    #[error("input too large: {0} chars (max: {1})")]
    TooLarge(usize, usize),

    /// A match that cannot be turned into a value
    #[error("unusable match: {0}")]
    Unusable(String),
}

/// A day field produced by one extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Activity list
    Activities,
    /// Included meals
    Meals,
    /// From/to travel segment
    Route,
    /// Overnight stay location
    Overnight,
}

impl Field {
    /// Get the field name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Activities => "activities",
            Field::Meals => "meals",
            Field::Route => "route",
            Field::Overnight => "overnight",
        }
    }

    /// Whether the day title is consulted before the body
    ///
    /// Routes are usually stated in the heading ("Delhi - Agra"); every other
    /// field prefers the body and only falls back to the title.
    pub fn title_first(&self) -> bool {
        matches!(self, Field::Route)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value returned by an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Activities found
    Activities(Vec<Activity>),
    /// Meals found, canonical order
    Meals(Vec<Meal>),
    /// Route found, if any
    Route(Option<Route>),
    /// Overnight location found, if any
    Overnight(Option<String>),
}

impl FieldValue {
    /// Whether the extractor found nothing
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Activities(v) => v.is_empty(),
            FieldValue::Meals(v) => v.is_empty(),
            FieldValue::Route(v) => v.is_none(),
            FieldValue::Overnight(v) => v.is_none(),
        }
    }
}

/// Settings visible to extractors
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext {
    /// Activity names longer than this are discarded
    pub max_activity_name_len: usize,
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self {
            max_activity_name_len: 80,
        }
    }
}

/// Signature shared by every field extractor
pub type ExtractFn = fn(&str, &ExtractContext) -> Result<FieldValue, ExtractError>;

/// A named extractor registered in the pipeline
#[derive(Clone, Copy)]
pub struct FieldExtractor {
    /// Field this extractor fills
    pub field: Field,

    /// The extraction function
    pub run: ExtractFn,
}

impl fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor").field("field", &self.field).finish()
    }
}

/// Text of one day, ready for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayText {
    /// Day number the text belongs to
    pub day_number: u32,

    /// Heading text after the day marker, if any
    pub title: Option<String>,

    /// Body lines joined with newlines
    pub body: String,
}

/// Everything the extractors found for one day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFields {
    /// Activities, de-duplicated
    pub activities: Vec<Activity>,
    /// Meals, canonical order
    pub meals: Vec<Meal>,
    /// Route, if found
    pub route: Option<Route>,
    /// Explicit overnight location, if found
    pub overnight: Option<String>,
}

impl DayFields {
    fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::Activities(v) => self.activities = v,
            FieldValue::Meals(v) => self.meals = v,
            FieldValue::Route(v) => self.route = v,
            FieldValue::Overnight(v) => self.overnight = v,
        }
    }

    /// Write the fields into a day entry
    ///
    /// The explicit overnight goes in first so a route only seeds it when
    /// none was stated.
    pub fn apply_to(self, entry: &mut DayEntry) {
        entry.activities = self.activities;
        entry.meals = self.meals;
        entry.overnight = self.overnight;
        if let Some(route) = self.route {
            entry.set_route(route);
        }
    }
}

/// Ordered list of `(field, extractor)` pairs
#[derive(Debug, Clone)]
pub struct FieldPipeline {
    extractors: Vec<FieldExtractor>,
}

impl FieldPipeline {
    /// Pipeline with the built-in extractors
    pub fn standard() -> Self {
        Self {
            extractors: vec![
                FieldExtractor { field: Field::Activities, run: activities::run },
                FieldExtractor { field: Field::Meals, run: meals::run },
                FieldExtractor { field: Field::Route, run: route::run },
                FieldExtractor { field: Field::Overnight, run: overnight::run },
            ],
        }
    }

    /// Replace the extractor for `field`, or append one
    pub fn with_extractor(mut self, field: Field, run: ExtractFn) -> Self {
        match self.extractors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.run = run,
            None => self.extractors.push(FieldExtractor { field, run }),
        }
        self
    }

    /// Registered fields in invocation order
    pub fn fields(&self) -> Vec<Field> {
        self.extractors.iter().map(|e| e.field).collect()
    }

    /// Run every extractor over a day
    ///
    /// Each extractor tries its preferred source first (body, or title for
    /// routes) and falls back to the other when the first yields nothing or
    /// fails.
    pub fn run_day(
        &self,
        day: &DayText,
        ctx: &ExtractContext,
        failures: &mut Vec<ExtractionFailure>,
    ) -> DayFields {
        let title = day.title.as_deref().unwrap_or("");
        let mut fields = DayFields::default();

        for extractor in &self.extractors {
            let sources = if extractor.field.title_first() {
                [title, day.body.as_str()]
            } else {
                [day.body.as_str(), title]
            };

            let found = sources
                .iter()
                .filter(|source| !source.trim().is_empty())
                .find_map(|source| {
                    isolate(extractor.field, Some(day.day_number), failures, || {
                        (extractor.run)(source, ctx)
                    })
                    .filter(|value| !value.is_empty())
                });

            if let Some(value) = found {
                fields.set(value);
            }
        }

        fields
    }
}

impl Default for FieldPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Invoke one extractor, converting errors and panics into a recorded failure
pub fn isolate<T>(
    field: Field,
    day: Option<u32>,
    failures: &mut Vec<ExtractionFailure>,
    f: impl FnOnce() -> Result<T, ExtractError>,
) -> Option<T> {
    let reason = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("extractor panicked: {}", panic_message(payload.as_ref())),
    };

    warn!(day = ?day, field = %field, reason = %reason, "field extraction failed");
    failures.push(match day {
        Some(n) => ExtractionFailure::day(n, field.as_str(), reason),
        None => ExtractionFailure::document(field.as_str(), reason),
    });
    None
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
