//! Duration parsing - "4N/5D", "5 Days / 4 Nights" and friends

use itinera_domain::StayDuration;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Which capture group holds which unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    NightsFirst,
    DaysFirst,
}

/// Pattern families, tried in this order; the first match wins.
static PATTERNS: LazyLock<Vec<(Regex, Order)>> = LazyLock::new(|| {
    [
        // 4N/5D, 4N5D, 4 Nts - 5 D
        (r"(?i)\b(\d{1,3})\s*N(?:ts?)?\s*(?:[/,&|+–-]\s*)?(\d{1,3})\s*D(?:ays?)?\b", Order::NightsFirst),
        // 5D/4N
        (r"(?i)\b(\d{1,3})\s*D\s*(?:[/,&|+–-]\s*)?(\d{1,3})\s*N(?:ts?|ights?)?\b", Order::DaysFirst),
        // 4 Nights / 5 Days, 4 Nights and 5 Days
        (r"(?i)\b(\d{1,3})\s*Nights?\s*(?:[/,&|+(–-]|\band\b)\s*(\d{1,3})\s*Days?\b", Order::NightsFirst),
        // 5 Days / 4 Nights, 5 Days (4 Nights)
        (r"(?i)\b(\d{1,3})\s*Days?\s*(?:[/,&|+(–-]|\band\b)\s*(\d{1,3})\s*Nights?\b", Order::DaysFirst),
        // 4 Nights 5 Days
        (r"(?i)\b(\d{1,3})\s*Nights?\s+(\d{1,3})\s*Days?\b", Order::NightsFirst),
        // 5 Days 4 Nights
        (r"(?i)\b(\d{1,3})\s*Days?\s+(\d{1,3})\s*Nights?\b", Order::DaysFirst),
    ]
    .into_iter()
    .map(|(pattern, order)| (Regex::new(pattern).unwrap(), order))
    .collect()
});

static DAYS_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*Days?\b").unwrap());
static NIGHTS_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*Nights?\b").unwrap());

/// A duration found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationMatch {
    /// The resolved nights/days pair
    pub duration: StayDuration,

    /// Byte range of the matched text within the line
    pub span: Range<usize>,

    /// Only one unit was written; the other was inferred
    pub single_unit: bool,
}

/// Punctuation authors put around a duration
const SEPARATORS: &[char] = &['-', '–', '—', '|', ':', ',', '(', ')', '[', ']', '/'];

/// Find a duration in a single line
///
/// The six two-unit pattern families are tried in a fixed order; when none
/// matches, a lone "N Days" or "N Nights" is accepted and the other unit is
/// inferred. Returns `None` when nothing matches so callers can keep
/// scanning.
///
/// # Examples
///
/// ```
/// use itinera_parser::duration::parse_duration;
///
/// let found = parse_duration("Kerala Delight 4N/5D").unwrap();
/// assert_eq!((found.duration.nights, found.duration.days), (4, 5));
/// ```
pub fn parse_duration(line: &str) -> Option<DurationMatch> {
    for (re, order) in PATTERNS.iter() {
        if let Some(caps) = re.captures(line) {
            let (Some(first), Some(second)) = (number(caps.get(1)), number(caps.get(2))) else {
                continue;
            };
            let duration = match order {
                Order::NightsFirst => StayDuration::new(first, second),
                Order::DaysFirst => StayDuration::new(second, first),
            };
            let span = caps.get(0).map(|m| m.range()).unwrap_or_default();
            return Some(DurationMatch { duration, span, single_unit: false });
        }
    }

    if let Some(caps) = DAYS_ONLY_RE.captures(line) {
        if let Some(days) = number(caps.get(1)) {
            let span = caps.get(0).map(|m| m.range()).unwrap_or_default();
            return Some(DurationMatch {
                duration: StayDuration::from_days(days),
                span,
                single_unit: true,
            });
        }
    }
    if let Some(caps) = NIGHTS_ONLY_RE.captures(line) {
        if let Some(nights) = number(caps.get(1)) {
            let span = caps.get(0).map(|m| m.range()).unwrap_or_default();
            return Some(DurationMatch {
                duration: StayDuration::from_nights(nights),
                span,
                single_unit: true,
            });
        }
    }

    None
}

/// Find a duration split over two adjacent lines
///
/// Only succeeds when the joined text matches and neither line matches on
/// its own, e.g. `"5 Days /"` followed by `"4 Nights"`.
pub fn parse_duration_pair(line: &str, next: &str) -> Option<StayDuration> {
    if parse_duration(line).is_some() || parse_duration(next).is_some() {
        return None;
    }
    parse_duration(&format!("{} {}", line, next)).map(|m| m.duration)
}

/// Remove a matched duration from a title line
///
/// Also trims the separators authors put around it, so
/// `"Kerala Delight - 4N/5D"` becomes `"Kerala Delight"`.
pub fn strip_duration(line: &str, span: &Range<usize>) -> String {
    let head = line[..span.start].trim_end().trim_end_matches(SEPARATORS);
    let tail = line[span.end..].trim_start().trim_start_matches(SEPARATORS);
    format!("{} {}", head.trim(), tail.trim()).trim().to_string()
}

/// Whether the line is nothing but a duration, optionally behind a short label
///
/// `"5 Days / 4 Nights"`, `"(4N/5D)"` and `"Duration: 6 Days | 5 Nights"`
/// qualify; prose that mentions a stay does not.
pub fn is_duration_only(line: &str, span: &Range<usize>) -> bool {
    let head = line[..span.start]
        .trim_end_matches(|c: char| c.is_whitespace() || (c != ':' && SEPARATORS.contains(&c)));
    let tail = line[span.end..]
        .trim_start_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c));

    tail.is_empty()
        && (head.is_empty() || head.ends_with(':') || head.split_whitespace().count() <= 2)
}

fn number(m: Option<regex::Match<'_>>) -> Option<u32> {
    m.and_then(|m| m.as_str().parse().ok())
}
