//! Meals included on a given day

use serde::{Deserialize, Serialize};

/// A meal included in the package
///
/// The derived ordering is the canonical output order:
/// breakfast, lunch, dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    /// Breakfast (code `B`)
    Breakfast,
    /// Lunch (code `L`)
    Lunch,
    /// Dinner (code `D`)
    Dinner,
}

impl Meal {
    /// Get the meal name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }

    /// Single-letter itinerary code
    pub fn code(&self) -> char {
        match self {
            Meal::Breakfast => 'B',
            Meal::Lunch => 'L',
            Meal::Dinner => 'D',
        }
    }

    /// Resolve a meal from its code letter, case-insensitively
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'B' => Some(Meal::Breakfast),
            'L' => Some(Meal::Lunch),
            'D' => Some(Meal::Dinner),
            _ => None,
        }
    }

    /// Resolve a meal from its full name or code
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c);
        }
        match s.to_lowercase().as_str() {
            "breakfast" => Some(Meal::Breakfast),
            "lunch" => Some(Meal::Lunch),
            "dinner" => Some(Meal::Dinner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let mut meals = vec![Meal::Dinner, Meal::Breakfast, Meal::Lunch];
        meals.sort();
        assert_eq!(meals, vec![Meal::Breakfast, Meal::Lunch, Meal::Dinner]);
    }

    #[test]
    fn test_parse_codes_and_words() {
        assert_eq!(Meal::parse("b"), Some(Meal::Breakfast));
        assert_eq!(Meal::parse("Dinner"), Some(Meal::Dinner));
        assert_eq!(Meal::parse("brunch"), None);
        assert_eq!(Meal::parse(""), None);
    }
}
