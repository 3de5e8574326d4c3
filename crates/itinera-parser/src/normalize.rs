//! Normalizer/Validator for externally produced itinerary objects
//!
//! Coerces a loosely shaped JSON object into a [`ParsedItinerary`] with the
//! same guarantees as the heuristic pipeline. Missing fields take defaults;
//! malformed fields are dropped and recorded as [`ExtractionFailure`]s. Only
//! a value that is not a JSON object at all is rejected.

use crate::config::ParserConfig;
use crate::duration::parse_duration;
use crate::error::ParseError;
use crate::extract::activities::classify;
use crate::extract::meals::extract_meals;
use crate::extract::route::parse_route;
use crate::{highlights, postprocess};
use itinera_domain::{
    Activity, ActivityType, DayEntry, ExtractionFailure, Meal, ParsedItinerary, StayDuration,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;
use tracing::warn;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

/// A normalized record and the fields that had to be dropped
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The canonical record
    pub itinerary: ParsedItinerary,

    /// Recovered field problems
    pub failures: Vec<ExtractionFailure>,
}

/// Normalize a JSON value into a canonical record
pub fn normalize(value: &Value, config: &ParserConfig) -> Result<Normalized, ParseError> {
    let object = value.as_object().ok_or_else(|| {
        ParseError::InvalidInput(format!("expected a JSON object, got {}", kind_of(value)))
    })?;
    Ok(Normalizer::new(config).run(object))
}

struct Normalizer<'a> {
    config: &'a ParserConfig,
    failures: Vec<ExtractionFailure>,
}

impl<'a> Normalizer<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            failures: Vec::new(),
        }
    }

    fn run(mut self, obj: &Map<String, Value>) -> Normalized {
        let mut record = ParsedItinerary {
            title: self.text(obj, "title", None).unwrap_or_default(),
            subtitle: self.text(obj, "subtitle", None).filter(|s| !s.is_empty()),
            description: self.text(obj, "description", None).unwrap_or_default(),
            duration_display: self.text(obj, "duration_display", None).unwrap_or_default(),
            includes: self.list(obj, "includes"),
            excludes: self.list(obj, "excludes"),
            highlights: self.list(obj, "highlights"),
            ..Default::default()
        };

        let duration = self.duration(obj, &record.duration_display);
        record.nights = duration.nights;
        record.days = duration.days;

        record.itinerary = self.days(obj);

        highlights::backfill(&mut record, self.config.highlight_fallback_limit);
        postprocess::finalize(&mut record, self.config);

        Normalized {
            itinerary: record,
            failures: self.failures,
        }
    }

    fn fail(&mut self, day: Option<u32>, field: &str, reason: String) {
        warn!(day = ?day, field, reason = %reason, "dropping malformed field");
        self.failures.push(match day {
            Some(n) => ExtractionFailure::day(n, field, reason),
            None => ExtractionFailure::document(field, reason),
        });
    }

    fn text(&mut self, obj: &Map<String, Value>, key: &str, day: Option<u32>) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
            Some(other) => {
                self.fail(day, key, format!("expected a string, got {}", kind_of(other)));
                None
            }
        }
    }

    fn count(&mut self, obj: &Map<String, Value>, key: &str, day: Option<u32>) -> Option<u32> {
        let parsed = match obj.get(key) {
            None | Some(Value::Null) => return None,
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Some(Value::String(s)) => INTEGER_RE
                .find(s)
                .and_then(|m| m.as_str().parse::<i64>().ok()),
            Some(_) => None,
        };

        match parsed {
            Some(n) => Some(n.clamp(0, i64::from(u32::MAX)) as u32),
            None => {
                let shown = obj.get(key).map(Value::to_string).unwrap_or_default();
                self.fail(day, key, format!("not a number: {}", shown));
                None
            }
        }
    }

    fn duration(&mut self, obj: &Map<String, Value>, display: &str) -> StayDuration {
        let mut nights = self.count(obj, "nights", None);
        let mut days = self.count(obj, "days", None);

        if nights.is_none() || days.is_none() {
            if let Some(found) = parse_duration(display) {
                nights = nights.or(Some(found.duration.nights));
                days = days.or(Some(found.duration.days));
            }
        }

        match (nights, days) {
            (Some(n), Some(d)) => StayDuration::new(n, d),
            (Some(n), None) => StayDuration::from_nights(n),
            (None, Some(d)) => StayDuration::from_days(d),
            (None, None) => StayDuration::default(),
        }
    }

    fn list(&mut self, obj: &Map<String, Value>, key: &str) -> Vec<String> {
        match obj.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) => s.split(['\n', ';']).map(str::to_string).collect(),
            Some(Value::Array(items)) => {
                let mut out = Vec::new();
                for item in items {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        Value::Number(_) | Value::Bool(_) => out.push(item.to_string()),
                        Value::Null => {}
                        other => {
                            self.fail(None, key, format!("list item is {}", kind_of(other)))
                        }
                    }
                }
                out
            }
            Some(other) => {
                self.fail(None, key, format!("expected a list, got {}", kind_of(other)));
                Vec::new()
            }
        }
    }

    fn days(&mut self, obj: &Map<String, Value>) -> Vec<DayEntry> {
        let items = match obj.get("itinerary") {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.fail(None, "itinerary", format!("expected a list, got {}", kind_of(other)));
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let position = u32::try_from(i + 1).unwrap_or(u32::MAX);
            match item.as_object() {
                Some(day) => entries.push(self.day(day, position)),
                None => self.fail(
                    Some(position),
                    "itinerary",
                    format!("day entry is {}", kind_of(item)),
                ),
            }
        }
        entries
    }

    fn day(&mut self, obj: &Map<String, Value>, position: u32) -> DayEntry {
        let number = self
            .count(obj, "day_number", Some(position))
            .filter(|n| *n > 0)
            .unwrap_or(position);
        let day = Some(number);

        let mut entry = DayEntry::new(number);
        if let Some(title) = self.text(obj, "title", day).filter(|t| !t.is_empty()) {
            entry.title = title;
        }
        entry.description = self.text(obj, "description", day).unwrap_or_default();
        entry.route_from = self.text(obj, "route_from", day).filter(|s| !s.is_empty());
        entry.route_to = self.text(obj, "route_to", day).filter(|s| !s.is_empty());
        entry.overnight = self.text(obj, "overnight", day).filter(|s| !s.is_empty());
        entry.meals = self.meals(obj.get("meals"), number);
        entry.activities = self.activities(obj.get("activities"), number);

        if entry.route_from.is_none() && entry.route_to.is_none() {
            if let Some(route) = self.text(obj, "route", day) {
                match parse_route(&route) {
                    Some(route) => entry.set_route(route),
                    None => self.fail(day, "route", format!("no route in {:?}", route)),
                }
            }
        }
        if entry.overnight.is_none() {
            entry.overnight = entry.route_to.clone();
        }

        entry
    }

    fn meals(&mut self, value: Option<&Value>, day: u32) -> Vec<Meal> {
        let mut meals = BTreeSet::new();
        match value {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => meals.extend(meal_text(s)),
            Some(Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(s) => meals.extend(meal_text(s)),
                        other => self.fail(
                            Some(day),
                            "meals",
                            format!("meal is {}", kind_of(other)),
                        ),
                    }
                }
            }
            Some(other) => {
                self.fail(Some(day), "meals", format!("expected a list, got {}", kind_of(other)))
            }
        }
        meals.into_iter().collect()
    }

    fn activities(&mut self, value: Option<&Value>, day: u32) -> Vec<Activity> {
        let items = match value {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.fail(
                    Some(day),
                    "activities",
                    format!("expected a list, got {}", kind_of(other)),
                );
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut activities = Vec::new();
        for item in items {
            let Some(activity) = self.activity(item, day) else {
                continue;
            };
            if activity.name.chars().count() > self.config.max_activity_name_len {
                self.fail(Some(day), "activities", format!("name too long: {}", activity.name));
                continue;
            }
            if seen.insert(activity.name.to_lowercase()) {
                activities.push(activity);
            }
        }
        activities
    }

    fn activity(&mut self, item: &Value, day: u32) -> Option<Activity> {
        match item {
            Value::String(name) => {
                let name = name.trim();
                (!name.is_empty()).then(|| Activity::new(name, classify(name), false))
            }
            Value::Object(obj) => {
                let name = self
                    .text(obj, "name", Some(day))
                    .filter(|n| !n.is_empty());
                let Some(name) = name else {
                    self.fail(Some(day), "activities", "activity without a name".to_string());
                    return None;
                };
                let kind = obj
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(ActivityType::parse)
                    .unwrap_or_else(|| classify(&name));
                let highlight = match obj.get("highlight") {
                    Some(Value::Bool(b)) => *b,
                    Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
                    _ => false,
                };
                let description = self
                    .text(obj, "description", Some(day))
                    .filter(|d| !d.is_empty());
                Some(Activity {
                    name,
                    kind,
                    highlight,
                    description,
                })
            }
            other => {
                self.fail(Some(day), "activities", format!("activity is {}", kind_of(other)));
                None
            }
        }
    }
}

fn meal_text(text: &str) -> Vec<Meal> {
    match Meal::parse(text) {
        Some(meal) => vec![meal],
        None => {
            let found = extract_meals(text);
            if found.is_empty() {
                // "B,L,D" style strings without parentheses
                text.split([',', '/', '&', '+', ' '])
                    .filter_map(Meal::parse)
                    .collect()
            } else {
                found
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
