//! Section segmentation - an explicit state machine over normalized lines

use crate::lines::strip_bullet;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static DAY_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^day\s*[-#]?\s*(\d{1,3}|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)\b\s*[:.)\-–—]*\s*(.*)$",
    )
    .unwrap()
});
static EXCLUDES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:the\s+)?(?:(?:package|tour|trip|price|cost)\s+)?(?:exclusions?|excludes?|excluded|not\s+included|what'?s\s+not\s+included)\s*(?:[:\-–]\s*(.*))?$",
    )
    .unwrap()
});
static INCLUDES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:the\s+)?(?:(?:package|tour|trip|price|cost)\s+)?(?:inclusions?|includes?|included|what'?s\s+included)\s*(?:[:\-–]\s*(.*))?$",
    )
    .unwrap()
});
static HIGHLIGHTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:tour|trip|package|key|main)\s+)?highlights?\s*(?:[:\-–]\s*(.*))?$",
    )
    .unwrap()
});

const HEADER_FRAGMENTS: &[&str] = &[
    "include", "includes", "inclusion", "inclusions", "included",
    "exclude", "excludes", "exclusion", "exclusions", "excluded", "not included",
    "highlight", "highlights", "package", "the package", "tour", "trip",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen", "twenty",
];

/// Where content lines are currently routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Before any header or day marker: title, duration, overview
    General,
    /// Inside an "Includes" list
    Includes,
    /// Inside an "Excludes" list
    Excludes,
    /// Inside a "Highlights" list
    Highlights,
    /// Inside the day-by-day itinerary
    Itinerary,
}

impl Section {
    /// Get the section name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::General => "general",
            Section::Includes => "includes",
            Section::Excludes => "excludes",
            Section::Highlights => "highlights",
            Section::Itinerary => "itinerary",
        }
    }

    /// Whether this section collects a bulleted list
    pub fn is_list(&self) -> bool {
        matches!(self, Section::Includes | Section::Excludes | Section::Highlights)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized day-marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarker {
    /// The number after "day", if it parsed
    pub number: Option<u32>,

    /// Text after the number and its separator
    pub title: Option<String>,
}

/// What a single line produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// A section header; the line itself is not content. `inline` holds any
    /// text after the header's colon.
    Header {
        /// Content on the header line itself
        inline: Option<String>,
    },
    /// Start of a new day
    DayMarker(DayMarker),
    /// A content line for the (new) current section
    Content(String),
    /// A line with nothing usable, e.g. a stray header fragment
    Discard,
}

/// Pure transition function: `(state, line) -> (new state, emission)`
///
/// Day markers win over headers, and both switch state from any section.
/// List sections receive lines with their bullet markers removed.
pub fn transition(state: Section, line: &str) -> (Section, Emission) {
    if let Some(marker) = parse_day_marker(line) {
        return (Section::Itinerary, Emission::DayMarker(marker));
    }

    if let Some((section, inline)) = parse_header(line) {
        let inline = inline.and_then(|text| list_item(&text));
        return (section, Emission::Header { inline });
    }

    let emission = if state.is_list() {
        list_item(line).map_or(Emission::Discard, Emission::Content)
    } else {
        Emission::Content(line.to_string())
    };
    (state, emission)
}

/// Stateful wrapper around [`transition`]
#[derive(Debug, Clone)]
pub struct Segmenter {
    state: Section,
}

impl Segmenter {
    /// Create a segmenter in the `General` state
    pub fn new() -> Self {
        Self {
            state: Section::General,
        }
    }

    /// Current section
    pub fn state(&self) -> Section {
        self.state
    }

    /// Feed one line, returning the section it was routed to and its emission
    pub fn feed(&mut self, line: &str) -> (Section, Emission) {
        let (next, emission) = transition(self.state, line);
        if next != self.state {
            debug!(from = %self.state, to = %next, "section transition");
        }
        self.state = next;
        (next, emission)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Recognize a day marker such as `"Day 1:"`, `"DAY 03 Cairo"` or `"Day 2. Arrival"`
pub fn parse_day_marker(line: &str) -> Option<DayMarker> {
    let line = unwrap_emphasis(line);
    let caps = DAY_MARKER_RE.captures(line)?;
    let raw_number = caps.get(1)?.as_str();
    let number = raw_number
        .parse::<u32>()
        .ok()
        .or_else(|| word_number(raw_number));
    let title = caps
        .get(2)
        .map(|m| unwrap_emphasis(m.as_str()).to_string())
        .filter(|t| !t.is_empty());
    Some(DayMarker { number, title })
}

/// Recognize an includes / excludes / highlights header
pub fn parse_header(line: &str) -> Option<(Section, Option<String>)> {
    let line = unwrap_emphasis(line);
    let table = [
        (&*EXCLUDES_RE, Section::Excludes),
        (&*INCLUDES_RE, Section::Includes),
        (&*HIGHLIGHTS_RE, Section::Highlights),
    ];
    table.into_iter().find_map(|(re, section)| {
        re.captures(line).map(|caps| {
            let inline = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty());
            (section, inline)
        })
    })
}

/// Whether a list line is only a leftover piece of a header
pub fn is_header_fragment(text: &str) -> bool {
    let cleaned = text.trim().trim_end_matches(':').trim().to_lowercase();
    cleaned.is_empty()
        || !cleaned.chars().any(char::is_alphanumeric)
        || HEADER_FRAGMENTS.contains(&cleaned.as_str())
}

fn list_item(line: &str) -> Option<String> {
    let item = strip_bullet(unwrap_emphasis(line));
    if is_header_fragment(item) {
        None
    } else {
        Some(item.to_string())
    }
}

fn unwrap_emphasis(line: &str) -> &str {
    line.trim()
        .trim_start_matches('#')
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
}

fn word_number(word: &str) -> Option<u32> {
    let word = word.to_lowercase();
    NUMBER_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(line: &str) -> Option<(Option<u32>, Option<String>)> {
        parse_day_marker(line).map(|m| (m.number, m.title))
    }

    #[test]
    fn test_day_marker_variants() {
        assert_eq!(marker("Day 1:"), Some((Some(1), None)));
        assert_eq!(marker("Day 01 Title"), Some((Some(1), Some("Title".into()))));
        assert_eq!(marker("DAY 3"), Some((Some(3), None)));
        assert_eq!(marker("Day 2. Arrival"), Some((Some(2), Some("Arrival".into()))));
        assert_eq!(marker("Day 3 Cairo"), Some((Some(3), Some("Cairo".into()))));
        assert_eq!(marker("day 4 - Petra"), Some((Some(4), Some("Petra".into()))));
        assert_eq!(marker("**Day 5: Wadi Rum**"), Some((Some(5), Some("Wadi Rum".into()))));
        assert_eq!(marker("Day Two: Giza"), Some((Some(2), Some("Giza".into()))));
    }

    #[test]
    fn test_not_day_markers() {
        assert_eq!(marker("Days are spent at leisure"), None);
        assert_eq!(marker("Daily breakfast"), None);
        assert_eq!(marker("Enjoy the day"), None);
    }

    #[test]
    fn test_headers() {
        assert_eq!(parse_header("Includes:"), Some((Section::Includes, None)));
        assert_eq!(parse_header("Package Includes"), Some((Section::Includes, None)));
        assert_eq!(parse_header("INCLUSIONS :"), Some((Section::Includes, None)));
        assert_eq!(parse_header("What's not included"), Some((Section::Excludes, None)));
        assert_eq!(parse_header("Exclusions"), Some((Section::Excludes, None)));
        assert_eq!(parse_header("Tour Highlights:"), Some((Section::Highlights, None)));
        assert_eq!(
            parse_header("Includes: Airport transfers"),
            Some((Section::Includes, Some("Airport transfers".into())))
        );
        assert_eq!(parse_header("Breakfast included"), None);
        assert_eq!(parse_header("Includes airport pickup"), None);
    }

    #[test]
    fn test_transition_routes_content() {
        assert_eq!(
            transition(Section::General, "A relaxing escape"),
            (Section::General, Emission::Content("A relaxing escape".into()))
        );
        assert_eq!(
            transition(Section::Includes, "- Daily breakfast"),
            (Section::Includes, Emission::Content("Daily breakfast".into()))
        );
        assert_eq!(
            transition(Section::Itinerary, "- Visit the fort"),
            (Section::Itinerary, Emission::Content("- Visit the fort".into()))
        );
    }

    #[test]
    fn test_transition_switches_state() {
        let (state, emission) = transition(Section::Itinerary, "Excludes:");
        assert_eq!(state, Section::Excludes);
        assert_eq!(emission, Emission::Header { inline: None });

        let (state, emission) = transition(Section::Includes, "Day 1: Arrival");
        assert_eq!(state, Section::Itinerary);
        assert!(matches!(emission, Emission::DayMarker(DayMarker { number: Some(1), .. })));
    }

    #[test]
    fn test_header_fragments_discarded() {
        assert_eq!(transition(Section::Includes, "Package:"), (Section::Includes, Emission::Discard));
        assert_eq!(transition(Section::Highlights, "- -"), (Section::Highlights, Emission::Discard));
        assert!(is_header_fragment("Inclusions"));
        assert!(!is_header_fragment("Airport transfers"));
    }

    #[test]
    fn test_segmenter_tracks_state() {
        let mut segmenter = Segmenter::new();
        assert_eq!(segmenter.state(), Section::General);
        segmenter.feed("Day 1");
        assert_eq!(segmenter.state(), Section::Itinerary);
        segmenter.feed("Highlights");
        assert_eq!(segmenter.state(), Section::Highlights);
        let (section, emission) = segmenter.feed("• Sunset cruise");
        assert_eq!(section, Section::Highlights);
        assert_eq!(emission, Emission::Content("Sunset cruise".into()));
    }
}
