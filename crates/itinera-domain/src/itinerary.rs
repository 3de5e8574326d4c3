//! The itinerary record - the root output of every extraction strategy

use crate::{Activity, Meal, StayDuration};
use serde::{Deserialize, Serialize};

/// A day's travel segment between two named places
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Place of departure
    pub from: String,

    /// Place of arrival
    pub to: String,
}

impl Route {
    /// Create a route
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One day of an itinerary
///
/// Day numbers are not guaranteed unique or contiguous; a malformed source
/// document may repeat or skip numbers and the record preserves that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Positive day number
    pub day_number: u32,

    /// Day heading, `"Day {n}"` when the source has none
    pub title: String,

    /// The whole day text, whitespace-joined
    pub description: String,

    /// Departure place of the day's route
    pub route_from: Option<String>,

    /// Arrival place of the day's route
    pub route_to: Option<String>,

    /// Where travellers stay the night
    pub overnight: Option<String>,

    /// Included meals in breakfast, lunch, dinner order
    pub meals: Vec<Meal>,

    /// Activities, unique by case-insensitive name
    pub activities: Vec<Activity>,
}

impl DayEntry {
    /// Create an empty day with the default title
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            title: Self::default_title(day_number),
            description: String::new(),
            route_from: None,
            route_to: None,
            overnight: None,
            meals: Vec::new(),
            activities: Vec::new(),
        }
    }

    /// Title used when the source gives none
    pub fn default_title(day_number: u32) -> String {
        format!("Day {}", day_number)
    }

    /// Route of this day, if both ends are known
    pub fn route(&self) -> Option<Route> {
        match (&self.route_from, &self.route_to) {
            (Some(from), Some(to)) => Some(Route::new(from.clone(), to.clone())),
            _ => None,
        }
    }

    /// Set both route ends; seeds `overnight` when it is still unknown
    pub fn set_route(&mut self, route: Route) {
        if self.overnight.is_none() {
            self.overnight = Some(route.to.clone());
        }
        self.route_from = Some(route.from);
        self.route_to = Some(route.to);
    }
}

/// A normalized, structured itinerary
///
/// Fully populated by construction: absence is an empty string, an empty
/// list, zero, or JSON `null` for the optional fields. Never an omitted key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedItinerary {
    /// Package title
    pub title: String,

    /// Optional subtitle
    pub subtitle: Option<String>,

    /// Free-text overview
    pub description: String,

    /// Number of nights
    pub nights: u32,

    /// Number of days
    pub days: u32,

    /// Display label, canonically `"{days} Days / {nights} Nights"`
    pub duration_display: String,

    /// Whether the trip stays within the home country
    pub is_domestic: bool,

    /// URL-safe identifier derived from title and duration
    pub slug: String,

    /// Days in document order
    pub itinerary: Vec<DayEntry>,

    /// What the package includes
    pub includes: Vec<String>,

    /// What the package excludes
    pub excludes: Vec<String>,

    /// Trip highlights
    pub highlights: Vec<String>,
}

impl ParsedItinerary {
    /// The nights/days pair of this record
    pub fn duration(&self) -> StayDuration {
        StayDuration::new(self.nights, self.days)
    }

    /// Every activity across all days, in document order
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.itinerary.iter().flat_map(|day| day.activities.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_seeds_overnight() {
        let mut day = DayEntry::new(2);
        day.set_route(Route::new("Delhi", "Agra"));
        assert_eq!(day.overnight.as_deref(), Some("Agra"));
        assert_eq!(day.route(), Some(Route::new("Delhi", "Agra")));
    }

    #[test]
    fn test_route_keeps_explicit_overnight() {
        let mut day = DayEntry::new(1);
        day.overnight = Some("Fatehpur".to_string());
        day.set_route(Route::new("Delhi", "Agra"));
        assert_eq!(day.overnight.as_deref(), Some("Fatehpur"));
    }

    #[test]
    fn test_empty_record_has_no_omitted_fields() {
        let json = serde_json::to_value(ParsedItinerary::default()).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "title", "subtitle", "description", "nights", "days",
            "duration_display", "is_domestic", "slug", "itinerary",
            "includes", "excludes", "highlights",
        ] {
            assert!(object.contains_key(key), "missing key {}", key);
        }
        assert!(json["includes"].as_array().unwrap().is_empty());
        assert!(json["subtitle"].is_null());
    }
}
