//! Overnight location phrases

use super::{ExtractContext, ExtractError, FieldValue};
use regex::Regex;
use std::sync::LazyLock;

// Tried in order; the first pattern yielding a usable place wins.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bovernight\s+(?:stay\s+)?(?:at|in)\s+([^.,;!()\n]+)",
        r"(?i)\bstay\s+(?:at|in)\s+([^.,;!()\n]+)",
        r"(?i)\bcheck[- ]?in\s+at\s+(?:the\s+|your\s+)?hotel\s+in\s+([^.,;!()\n]+)",
        r"(?i)\bovernight\s*[:\-–]\s*([^.,;!()\n]+)",
        r"(?i)\bat\s+(?:the\s+|your\s+)?hotel\s+in\s+([^.,;!()\n]+)",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:the|your|a|our)\s+)?(?:(?:hotel|resort|camp|lodge)\s+(?:in|at)\s+)?(?:the\s+)?")
        .unwrap()
});

static TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:and|with|for|after|before|where|then|overnight)\b.*$").unwrap()
});

static QUALIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s+)(?:hotel|city|town)$").unwrap());

const MAX_PLACE_LEN: usize = 60;

/// Pipeline entry point
pub fn run(text: &str, _ctx: &ExtractContext) -> Result<FieldValue, ExtractError> {
    Ok(FieldValue::Overnight(extract_overnight(text)))
}

/// Find the overnight location stated in text
pub fn extract_overnight(text: &str) -> Option<String> {
    PATTERNS.iter().find_map(|re| {
        re.captures_iter(text).find_map(|caps| clean_place(&caps[1]))
    })
}

fn clean_place(raw: &str) -> Option<String> {
    let place = LEADING_RE.replace(raw.trim(), "");
    let place = TAIL_RE.replace(&place, "");
    let mut place = place.trim().to_string();

    while let Some(m) = QUALIFIER_RE.find(&place) {
        place.truncate(m.start());
    }

    let place = place.trim();
    let usable = place.chars().next().is_some_and(char::is_alphabetic)
        && place.chars().count() <= MAX_PLACE_LEN;
    usable.then(|| place.to_string())
}
