//! "From - To" route detection between capitalized place names

use super::{ExtractContext, ExtractError, FieldValue};
use itinera_domain::Route;
use regex::Regex;
use std::sync::LazyLock;

static ROUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let place = r"\p{Lu}[\p{L}'’]*(?:[ \t]+\p{Lu}[\p{L}'’]*)*";
    Regex::new(&format!(
        r"({place})[ \t]*(?:-{{1,2}}>|=>|[-–—→⇒➔]|[ \t]to[ \t])[ \t]*({place})"
    ))
    .unwrap()
});

/// Words that open a heading but are not part of a place name
const LEADING_STOPWORDS: &[&str] = &[
    "arrive", "arrival", "arriving", "depart", "departure", "drive", "transfer", "visit",
    "proceed", "fly", "flight", "travel", "journey", "welcome", "check", "day", "morning",
    "afternoon", "evening", "after", "later", "then", "return", "back", "go", "head",
    "continue", "board", "take", "enjoy", "explore", "the", "overnight", "breakfast", "lunch",
    "dinner", "from", "in", "at", "to", "excursion", "tour",
];

/// Generic nouns trailing a place name
const TRAILING_QUALIFIERS: &[&str] = &[
    "city", "town", "hotel", "transfer", "transfers", "tour", "sightseeing", "excursion",
    "arrival", "departure", "day",
];

/// Pipeline entry point
///
/// A match whose two ends name the same place is reported as an error
/// rather than a route.
pub fn run(text: &str, _ctx: &ExtractContext) -> Result<FieldValue, ExtractError> {
    let mut degenerate = None;

    for caps in ROUTE_RE.captures_iter(text) {
        let (Some(from), Some(to)) = (clean_from(&caps[1]), clean_to(&caps[2])) else {
            continue;
        };
        if from.eq_ignore_ascii_case(&to) {
            degenerate.get_or_insert(from);
            continue;
        }
        return Ok(FieldValue::Route(Some(Route::new(from, to))));
    }

    match degenerate {
        Some(place) => Err(ExtractError::Unusable(format!(
            "route starts and ends at {}",
            place
        ))),
        None => Ok(FieldValue::Route(None)),
    }
}

/// Find the first usable route in text
pub fn extract_route(text: &str) -> Option<Route> {
    match run(text, &ExtractContext::default()) {
        Ok(FieldValue::Route(route)) => route,
        _ => None,
    }
}

/// Split a free-form route string such as `"Paris - Lyon"`
pub fn parse_route(text: &str) -> Option<Route> {
    extract_route(text.trim())
}

fn clean_from(side: &str) -> Option<String> {
    let words: Vec<&str> = side.split_whitespace().collect();
    let start = words
        .iter()
        .position(|w| !is_listed(w, LEADING_STOPWORDS))
        .unwrap_or(words.len());
    strip_qualifiers(&words[start..])
}

fn clean_to(side: &str) -> Option<String> {
    let words: Vec<&str> = side.split_whitespace().collect();
    strip_qualifiers(&words)
}

fn strip_qualifiers(words: &[&str]) -> Option<String> {
    let end = words
        .iter()
        .rposition(|w| !is_listed(w, TRAILING_QUALIFIERS))
        .map_or(0, |i| i + 1);
    let place = words[..end].join(" ");
    (!place.is_empty()).then_some(place)
}

fn is_listed(word: &str, list: &[&str]) -> bool {
    list.contains(&word.to_lowercase().as_str())
}
