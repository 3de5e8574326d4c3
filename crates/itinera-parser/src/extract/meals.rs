//! Meal extraction from codes, labels and meal words

use super::{ExtractContext, ExtractError, FieldValue};
use itinera_domain::Meal;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PAREN_CODES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*([BLD](?:\s*[,/&+ ]\s*[BLD])*)\s*\)").unwrap()
});

// "Meals: B, L", "Meals B", "Meals included: B"
static LABEL_CODES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:meals?)(?:\s+(?i:included|provided|incl\.?))?\s*[:\-–]?\s*([BLD](?:\s*[,/&+]\s*[BLD])*)\b",
    )
    .unwrap()
});

// Bare codes in combination ("B/L/D", "B, D").
static COMBO_CODES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[BLD](?:\s*[,/&+]\s*[BLD]\b)+").unwrap());

// A lone capital code only when it closes a clause of its own:
// "Sightseeing tour. B", "City tour - D". "Plan B for" does not qualify.
static STANDALONE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[.;:|\-–—]\s*)([BLD])[ \t]*(?:[.;!]|$)").unwrap()
});

static MEAL_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(breakfast|lunch|dinner)\b").unwrap());

static NEGATED_BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:no|without|excluding)\s+$").unwrap());

static NEGATED_AFTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s+(?:is\s+|are\s+)?(?:not\s+included|excluded|on\s+own|at\s+own\s+cost)")
        .unwrap()
});

/// Pipeline entry point
pub fn run(text: &str, _ctx: &ExtractContext) -> Result<FieldValue, ExtractError> {
    Ok(FieldValue::Meals(extract_meals(text)))
}

/// Extract included meals in canonical order
pub fn extract_meals(text: &str) -> Vec<Meal> {
    let mut meals = BTreeSet::new();

    for re in [&*PAREN_CODES_RE, &*LABEL_CODES_RE, &*STANDALONE_CODE_RE] {
        for caps in re.captures_iter(text) {
            meals.extend(codes(&caps[1]));
        }
    }
    for m in COMBO_CODES_RE.find_iter(text) {
        meals.extend(codes(m.as_str()));
    }

    for m in MEAL_WORD_RE.find_iter(text) {
        let negated = NEGATED_BEFORE_RE.is_match(&text[..m.start()])
            || NEGATED_AFTER_RE.is_match(&text[m.end()..]);
        if !negated {
            meals.extend(Meal::parse(m.as_str()));
        }
    }

    meals.into_iter().collect()
}

fn codes(text: &str) -> impl Iterator<Item = Meal> + '_ {
    text.chars().filter_map(Meal::from_code)
}
