//! Highlight backfill for documents without a highlights section

use itinera_domain::ParsedItinerary;
use std::collections::HashSet;

/// Derive highlights from activities when none were stated
///
/// Emphasized activities come first; when there are none, up to `limit`
/// cultural or sightseeing activities are used. Existing highlights are
/// left untouched.
pub fn backfill(record: &mut ParsedItinerary, limit: usize) {
    if !record.highlights.is_empty() {
        return;
    }

    let mut highlights = unique_names(record.activities().filter(|a| a.highlight).map(|a| &a.name));

    if highlights.is_empty() {
        highlights = unique_names(
            record
                .activities()
                .filter(|a| a.kind.is_notable())
                .map(|a| &a.name),
        );
        highlights.truncate(limit);
    }

    record.highlights = highlights;
}

fn unique_names<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(name.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_domain::{Activity, ActivityType, DayEntry};

    fn record(activities: Vec<Activity>) -> ParsedItinerary {
        let mut day = DayEntry::new(1);
        day.activities = activities;
        ParsedItinerary {
            itinerary: vec![day],
            ..Default::default()
        }
    }

    #[test]
    fn test_emphasized_activities_win() {
        let mut r = record(vec![
            Activity::new("airport", ActivityType::Transfer, false),
            Activity::new("ancient temple", ActivityType::Cultural, true),
            Activity::new("old town", ActivityType::Sightseeing, false),
        ]);
        backfill(&mut r, 5);
        assert_eq!(r.highlights, vec!["ancient temple"]);
    }

    #[test]
    fn test_falls_back_to_notable_types() {
        let mut r = record(
            (0..8)
                .map(|i| Activity::new(format!("site {}", i), ActivityType::Sightseeing, false))
                .chain([Activity::new("spa", ActivityType::Leisure, false)])
                .collect(),
        );
        backfill(&mut r, 5);
        assert_eq!(r.highlights.len(), 5);
        assert_eq!(r.highlights[0], "site 0");
    }

    #[test]
    fn test_existing_highlights_untouched() {
        let mut r = record(vec![Activity::new("temple", ActivityType::Cultural, true)]);
        r.highlights = vec!["Sunset cruise".to_string()];
        backfill(&mut r, 5);
        assert_eq!(r.highlights, vec!["Sunset cruise"]);
    }

    #[test]
    fn test_nothing_to_backfill() {
        let mut r = record(vec![Activity::new("airport", ActivityType::Transfer, false)]);
        backfill(&mut r, 5);
        assert!(r.highlights.is_empty());
    }
}
