//! Verb-anchored activity extraction with keyword classification

use super::{ExtractContext, ExtractError, FieldValue};
use crate::lines::{is_bullet, strip_bullet};
use itinera_domain::{Activity, ActivityType};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Day text beyond this many characters is refused
pub const MAX_DAY_TEXT: usize = 20_000;

static VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:visit(?:s|ing|ed)?|transfer(?:s|red|ring)?|driv(?:e|es|ing)|drove|explor(?:e|es|ing|ed)|enjoy(?:s|ing|ed)?|arriv(?:e|es|ing|ed)|depart(?:s|ing|ed)?|check(?:ed|ing)?[- ]?in|see(?:s|ing)?|experienc(?:e|es|ing)|discover(?:s|ing|ed)?|tour(?:s|ing)?|tak(?:e|es|ing)|go(?:es)?\s+to|going\s+to|head(?:s|ing)?\s+to)\b",
    )
    .unwrap()
});

static EMPHATIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:visit\w*|explor\w*|see|sees|seeing|experienc\w*|enjoy\w*|discover\w*|tour|tours|touring)\b")
        .unwrap()
});

static CONJUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+|\s*&\s*").unwrap());

static TAXONOMY: LazyLock<Vec<(ActivityType, Regex)>> = LazyLock::new(|| {
    ActivityType::PRIORITY
        .into_iter()
        .filter(|kind| !keywords(*kind).is_empty())
        .map(|kind| {
            let alternatives: Vec<String> =
                keywords(kind).iter().map(|kw| regex::escape(kw)).collect();
            let pattern = format!(r"(?i)\b(?:{})(?:s|es|ing)?\b", alternatives.join("|"));
            (kind, Regex::new(&pattern).unwrap())
        })
        .collect()
});

const LEADING_FILLER: &[&str] = &[
    "the", "a", "an", "from", "to", "at", "in", "into", "for", "by", "with", "on", "of", "around",
    "our", "your", "some",
];

const TRAILING_FILLER: &[&str] = &[
    "and", "to", "then", "or", "&", "before", "after", "where", "for", "with", "at", "in", "of",
    "the", "later",
];

const NOISE: &[&str] = &[
    "hotel", "the hotel", "your hotel", "resort", "room", "rooms", "it", "there", "here", "back",
    "breakfast", "lunch", "dinner", "day", "morning", "afternoon", "evening", "after breakfast",
    "after lunch",
];

/// Taxonomy keywords per activity type
///
/// Sightseeing is the fallback and has none.
pub fn keywords(kind: ActivityType) -> &'static [&'static str] {
    match kind {
        ActivityType::Transfer => &[
            "airport", "transfer", "pickup", "pick-up", "drop", "departure", "arrival", "station",
            "flight", "check-in", "drive", "taxi", "ferry",
        ],
        ActivityType::Cultural => &[
            "temple", "church", "mosque", "museum", "palace", "fort", "monastery", "cathedral",
            "shrine", "heritage", "monument", "ruin", "tomb", "pagoda", "pyramid",
        ],
        ActivityType::Shopping => &["shopping", "market", "bazaar", "mall", "souvenir"],
        ActivityType::Adventure => &[
            "trek", "trekking", "hike", "hiking", "rafting", "safari", "paragliding", "zipline",
            "kayak", "scuba", "diving", "bungee", "jeep",
        ],
        ActivityType::Beach => &["beach", "island", "snorkel", "snorkeling", "coast", "lagoon"],
        ActivityType::Leisure => &[
            "leisure", "relax", "spa", "free time", "massage", "pool", "cruise",
        ],
        ActivityType::Show => &[
            "show", "performance", "dance", "dancing", "concert", "theatre", "theater", "cabaret",
            "light and sound",
        ],
        ActivityType::Sightseeing => &[],
    }
}

/// Classify an activity name by the first matching taxonomy entry
pub fn classify(name: &str) -> ActivityType {
    TAXONOMY
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(kind, _)| *kind)
        .unwrap_or_default()
}

/// Pipeline entry point
pub fn run(text: &str, ctx: &ExtractContext) -> Result<FieldValue, ExtractError> {
    let len = text.chars().count();
    if len > MAX_DAY_TEXT {
        return Err(ExtractError::TooLarge(len, MAX_DAY_TEXT));
    }
    Ok(FieldValue::Activities(extract_activities(
        text,
        ctx.max_activity_name_len,
    )))
}

/// Extract activities from day text
///
/// Each action verb opens a segment that runs to the next verb or
/// punctuation. A bullet also opens a segment, so text ahead of the first
/// verb on a bullet line is kept. Names are
/// de-duplicated case-insensitively, first occurrence wins.
pub fn extract_activities(text: &str, max_name_len: usize) -> Vec<Activity> {
    let mut seen = HashSet::new();
    let mut activities = Vec::new();

    for line in text.lines() {
        let bullet = is_bullet(line);
        for sentence in strip_bullet(line).split(['.', ';', '!', '?']) {
            for segment in segments(sentence, bullet) {
                for name in names(segment.object) {
                    if !acceptable(&name, max_name_len) {
                        continue;
                    }
                    if seen.insert(name.to_lowercase()) {
                        let kind = classify(&name);
                        activities.push(Activity::new(name, kind, segment.highlight));
                    }
                }
            }
        }
    }

    activities
}

struct Segment<'a> {
    object: &'a str,
    highlight: bool,
}

fn segments(sentence: &str, bullet: bool) -> Vec<Segment<'_>> {
    let verbs: Vec<_> = VERB_RE.find_iter(sentence).collect();

    if verbs.is_empty() {
        if bullet {
            let object = clause(sentence);
            return vec![Segment {
                object,
                highlight: EMPHATIC_RE.is_match(object),
            }];
        }
        return Vec::new();
    }

    let mut out = Vec::with_capacity(verbs.len() + 1);
    if bullet {
        let lead = clause(&sentence[..verbs[0].start()]);
        if !lead.is_empty() {
            out.push(Segment {
                object: lead,
                highlight: EMPHATIC_RE.is_match(lead),
            });
        }
    }

    out.extend(verbs.iter().enumerate().map(|(i, verb)| {
        let end = verbs.get(i + 1).map_or(sentence.len(), |next| next.start());
        let object = clause(&sentence[verb.end()..end]);
        Segment {
            object,
            highlight: EMPHATIC_RE.is_match(verb.as_str()) || EMPHATIC_RE.is_match(object),
        }
    }));
    out
}

fn clause(text: &str) -> &str {
    let end = text.find([',', ':', '(', ')']).unwrap_or(text.len());
    text[..end].trim()
}

fn names(object: &str) -> Vec<String> {
    CONJUNCTION_RE
        .split(object)
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .collect()
}

fn clean_name(part: &str) -> String {
    let mut words: Vec<&str> = part.split_whitespace().collect();

    while words
        .first()
        .is_some_and(|w| LEADING_FILLER.contains(&w.to_lowercase().as_str()))
    {
        words.remove(0);
    }
    while words
        .last()
        .is_some_and(|w| TRAILING_FILLER.contains(&w.to_lowercase().as_str()))
    {
        words.pop();
    }

    words
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

fn acceptable(name: &str, max_len: usize) -> bool {
    name.chars().any(char::is_alphabetic)
        && name.chars().count() <= max_len
        && !NOISE.contains(&name.to_lowercase().as_str())
}
