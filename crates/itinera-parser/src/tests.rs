//! Document-level scenarios for the heuristic parser

#[cfg(test)]
mod tests {
    use crate::extract::{ExtractContext, ExtractError, ExtractFn, Field, FieldPipeline, FieldValue};
    use crate::ItineraryParser;
    use itinera_domain::{ActivityType, Meal, ParsedItinerary};

    const BALI: &str = "Bali Escape\n5 Days / 4 Nights\nDay 1: Arrival in Bali\nTransfer from airport. Check-in hotel. Overnight at Bali.\nDay 2: Ubud Tour\nVisit rice terraces and temple. Breakfast included.\nIncludes:\n- Airport transfers\n- Daily breakfast";

    fn parse(text: &str) -> ParsedItinerary {
        ItineraryParser::default().parse(text).unwrap().itinerary
    }

    #[test]
    fn test_end_to_end_bali() {
        let report = ItineraryParser::default().parse(BALI).unwrap();
        let record = &report.itinerary;

        assert_eq!(record.title, "Bali Escape");
        assert_eq!((record.nights, record.days), (4, 5));
        assert_eq!(record.duration_display, "5 Days / 4 Nights");
        assert_eq!(record.slug, "bali-escape-5d4n");
        assert!(!record.is_domestic);
        assert_eq!(record.includes, vec!["Airport transfers", "Daily breakfast"]);
        assert!(record.excludes.is_empty());
        assert_eq!(record.itinerary.len(), 2);

        let day1 = &record.itinerary[0];
        assert_eq!(day1.day_number, 1);
        assert_eq!(day1.title, "Arrival in Bali");
        assert_eq!(day1.overnight.as_deref(), Some("Bali"));
        assert_eq!(day1.activities.len(), 1);
        assert_eq!(day1.activities[0].kind, ActivityType::Transfer);

        let day2 = &record.itinerary[1];
        assert_eq!(day2.day_number, 2);
        assert_eq!(day2.meals, vec![Meal::Breakfast]);
        assert!(day2
            .activities
            .iter()
            .any(|a| a.kind == ActivityType::Cultural && a.highlight));
        assert_eq!(day2.overnight, None);

        assert_eq!(record.highlights, vec!["rice terraces", "temple"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_day_marker_variants() {
        for marker in ["Day 1: Arrival", "DAY 01 Arrival", "Day 1 Arrival", "Day 1. Arrival", "day 1 - Arrival"] {
            let record = parse(&format!("Trip\n{}\nLeisure time.", marker));
            assert_eq!(record.itinerary.len(), 1, "{}", marker);
            assert_eq!(record.itinerary[0].day_number, 1, "{}", marker);
            assert!(record.itinerary[0].title.contains("Arrival"), "{}", marker);
        }
    }

    #[test]
    fn test_bare_marker_gets_default_title() {
        let record = parse("Trip\nDAY 3\nFree day.");
        assert_eq!(record.itinerary[0].day_number, 3);
        assert_eq!(record.itinerary[0].title, "Day 3");
        assert_eq!(record.itinerary[0].description, "Free day.");
    }

    #[test]
    fn test_duplicate_day_numbers_preserved() {
        let record = parse("Trip\nDay 1: Rome\nDay 1: Florence\nDay 3: Venice");
        let numbers: Vec<_> = record.itinerary.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 1, 3]);
    }

    #[test]
    fn test_highlight_backfill() {
        let record = parse("Temple Trail\nDay 1: Kyoto\nVisit the ancient temple.");
        assert!(record.highlights.contains(&"ancient temple".to_string()));
    }

    #[test]
    fn test_explicit_highlights_not_backfilled() {
        let record = parse("Trip\nDay 1\nVisit the ancient temple.\nHighlights:\n• Sunset cruise");
        assert_eq!(record.highlights, vec!["Sunset cruise"]);
    }

    #[test]
    fn test_sections_after_days() {
        let record = parse(
            "Trip\nDay 1: Arrival\nRelax.\nExcludes:\n- Visa fees\n- Tips\nDay 2: Departure\nTransfer to airport.",
        );
        assert_eq!(record.excludes, vec!["Visa fees", "Tips"]);
        assert_eq!(record.itinerary.len(), 2);
        assert_eq!(record.itinerary[0].description, "Relax.");
        assert_eq!(record.itinerary[1].activities[0].kind, ActivityType::Transfer);
    }

    #[test]
    fn test_meal_union_is_deduplicated() {
        let record = parse("Trip\nDay 1\nCity walk (B,L,D). Breakfast at the hotel.");
        assert_eq!(
            record.itinerary[0].meals,
            vec![Meal::Breakfast, Meal::Lunch, Meal::Dinner]
        );
    }

    #[test]
    fn test_lone_meal_codes_in_day_text() {
        let record = parse(
            "Egypt Explorer\nDay 1: Giza\nPyramids visit. Meals included: B\nDay 2: Cairo\nCity tour - D\nDay 3: Alexandria\nPlan B for the afternoon if it rains.",
        );
        assert_eq!(record.itinerary[0].meals, vec![Meal::Breakfast]);
        assert_eq!(record.itinerary[1].meals, vec![Meal::Dinner]);
        assert!(record.itinerary[2].meals.is_empty());
    }

    #[test]
    fn test_prose_duration_mention_stays_in_description() {
        let record = parse("Bali Escape\nWe spend 3 nights in Ubud among rice fields.\nDay 1: Arrival");
        assert_eq!(record.description, "We spend 3 nights in Ubud among rice fields.");
        assert_eq!((record.nights, record.days), (0, 0));
    }

    fn failing_route(_: &str, _: &ExtractContext) -> Result<FieldValue, ExtractError> {
        Err(ExtractError::Unusable("unbalanced capitalization".to_string()))
    }

    fn panicking_route(text: &str, _: &ExtractContext) -> Result<FieldValue, ExtractError> {
        panic!("cannot route {:?}", text)
    }

    #[test]
    fn test_route_failure_keeps_sibling_fields() {
        let text = "Trip\nDay 1: CaIrO - lUxOr\nVisit the KaRnAk TeMpLe - LuXoR →→ (B,L)\nDay 2\nVisit the Valley of the Kings (D)";

        for route in [failing_route as ExtractFn, panicking_route] {
            let parser = ItineraryParser::default()
                .with_pipeline(FieldPipeline::standard().with_extractor(Field::Route, route));
            let report = parser.parse(text).unwrap();
            let days = &report.itinerary.itinerary;

            assert!(!days[0].activities.is_empty());
            assert_eq!(days[0].activities[0].kind, ActivityType::Cultural);
            assert_eq!(days[0].meals, vec![Meal::Breakfast, Meal::Lunch]);
            assert!(days[0].route_from.is_none());

            assert!(!days[1].activities.is_empty());
            assert_eq!(days[1].meals, vec![Meal::Dinner]);

            assert!(!report.failures.is_empty());
            assert!(report.failures.iter().all(|f| f.field == "route"));
        }
    }

    #[test]
    fn test_rendering_is_a_fixed_point() {
        let first = parse(BALI);
        let second = parse(&first.to_plain_text());
        let third = parse(&second.to_plain_text());

        for record in [&second, &third] {
            assert_eq!(record.nights, first.nights);
            assert_eq!(record.days, first.days);
            assert_eq!(record.slug, first.slug);
        }
        assert_eq!(second, third);
    }

    #[test]
    fn test_empty_document() {
        let record = parse("");
        assert_eq!(record.title, "");
        assert_eq!((record.nights, record.days), (0, 0));
        assert_eq!(record.duration_display, "");
        assert_eq!(record.slug, "package");
        assert!(record.itinerary.is_empty());
        assert!(record.includes.is_empty());
    }

    #[test]
    fn test_split_duration_and_domestic() {
        let record = parse("Goa Beach Holiday\nStay of 4 N /\n5 D\nSun, sand and seafood.");
        assert_eq!((record.nights, record.days), (4, 5));
        assert_eq!(record.description, "Sun, sand and seafood.");
        assert!(record.is_domestic);
        assert_eq!(record.slug, "goa-beach-holiday-5d4n");
    }

    #[test]
    fn test_concurrent_parses_are_independent() {
        let parser = &ItineraryParser::default();
        let documents = [BALI, "Nile Cruise\n4N/5D\nDay 1: Cairo - Luxor", ""];

        let slugs: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = documents
                .iter()
                .map(|doc| scope.spawn(move || parser.parse(doc).unwrap().itinerary.slug))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(slugs, vec!["bali-escape-5d4n", "nile-cruise-5d4n", "package"]);
    }
}
