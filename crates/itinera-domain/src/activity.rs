//! Activity module - a single thing travellers do on a given day

use serde::{Deserialize, Serialize};

/// Closed taxonomy of activity kinds
///
/// The declaration order is the classification priority: when an activity
/// mentions keywords of several kinds, the earliest kind wins. `Sightseeing`
/// is last because it is the default for unmatched activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Airport pickups, drives, check-ins and other movement
    Transfer,

    /// Temples, museums, forts and other heritage sites
    Cultural,

    /// Markets, bazaars and malls
    Shopping,

    /// Treks, rafting, safaris and similar
    Adventure,

    /// Beaches, islands and snorkelling
    Beach,

    /// Free time, spa and relaxation
    Leisure,

    /// Performances, dance and light-and-sound shows
    Show,

    /// Anything else worth seeing (default)
    Sightseeing,
}

impl ActivityType {
    /// All kinds in classification priority order
    pub const PRIORITY: [ActivityType; 8] = [
        ActivityType::Transfer,
        ActivityType::Cultural,
        ActivityType::Shopping,
        ActivityType::Adventure,
        ActivityType::Beach,
        ActivityType::Leisure,
        ActivityType::Show,
        ActivityType::Sightseeing,
    ];

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Transfer => "transfer",
            ActivityType::Cultural => "cultural",
            ActivityType::Shopping => "shopping",
            ActivityType::Adventure => "adventure",
            ActivityType::Beach => "beach",
            ActivityType::Leisure => "leisure",
            ActivityType::Show => "show",
            ActivityType::Sightseeing => "sightseeing",
        }
    }

    /// Parse a kind from a string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::PRIORITY.into_iter().find(|t| t.as_str() == wanted)
    }

    /// Whether this kind is eligible for highlight backfill
    pub fn is_notable(&self) -> bool {
        matches!(self, ActivityType::Cultural | ActivityType::Sightseeing)
    }
}

impl Default for ActivityType {
    fn default() -> Self {
        ActivityType::Sightseeing
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid activity type: {}", s))
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activity of a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Trimmed, non-empty activity name
    pub name: String,

    /// Classified kind
    #[serde(rename = "type")]
    pub kind: ActivityType,

    /// Whether the source phrased this with an emphatic visiting verb
    pub highlight: bool,

    /// Free-text description (only supplied by the LLM-assisted path)
    pub description: Option<String>,
}

impl Activity {
    /// Create an activity without a description
    pub fn new(name: impl Into<String>, kind: ActivityType, highlight: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            highlight,
            description: None,
        }
    }
}
