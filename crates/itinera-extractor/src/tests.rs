//! End-to-end tests for the LLM extractor

#[cfg(test)]
mod tests {
    use crate::{ExtractorConfig, ExtractorError, LlmExtractor};
    use itinera_domain::{ActivityType, Meal, Strategy};
    use itinera_llm::MockProvider;
    use itinera_parser::ItineraryParser;
    use std::time::Duration;

    const BALI: &str = "Bali Escape\n5 Days / 4 Nights\nDay 1: Arrival in Bali\nTransfer from airport. Check-in hotel. Overnight at Bali.\nDay 2: Ubud Tour\nVisit rice terraces and temple. Breakfast included.\nIncludes:\n- Airport transfers\n- Daily breakfast";

    fn extractor(llm: MockProvider) -> LlmExtractor<MockProvider> {
        LlmExtractor::new(llm, ExtractorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_wrapped_reply_is_normalized() {
        let reply = r#"Here is the itinerary you asked for:
```json
{
  "title": "Nile Cruise",
  "duration_display": "5 Days / 4 Nights",
  "itinerary": [
    {"day_number": 1, "title": "Cairo - Luxor", "route": "Cairo - Luxor", "meals": ["B", "dinner"],
     "activities": ["Karnak Temple", {"name": "Felucca ride", "type": "boating", "highlight": true}]},
    {"day_number": "2", "title": "Luxor", "meals": "B,L"}
  ],
  "includes": ["Cruise cabin", "", "cruise cabin"]
}
```
Let me know if you need changes."#;

        let report = extractor(MockProvider::new(reply)).extract("Nile Cruise").await.unwrap();
        let record = &report.itinerary;

        assert_eq!(report.metadata.strategy, Strategy::Llm);
        assert_eq!((record.nights, record.days), (4, 5));
        assert_eq!(record.slug, "nile-cruise-5d4n");
        assert_eq!(record.includes, vec!["Cruise cabin"]);

        let day1 = &record.itinerary[0];
        assert_eq!(day1.route_from.as_deref(), Some("Cairo"));
        assert_eq!(day1.overnight.as_deref(), Some("Luxor"));
        assert_eq!(day1.meals, vec![Meal::Breakfast, Meal::Dinner]);
        assert_eq!(day1.activities[0].kind, ActivityType::Cultural);
        assert_eq!(day1.activities[1].kind, ActivityType::Sightseeing);

        assert_eq!(record.itinerary[1].day_number, 2);
        assert_eq!(record.itinerary[1].meals, vec![Meal::Breakfast, Meal::Lunch]);
        assert_eq!(record.highlights, vec!["Felucca ride"]);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_reply_is_auto_closed() {
        let reply = r#"{"title": "Kerala Backwaters", "nights": 3, "itinerary": [{"day_number": 1, "title": "Kochi"}]"#;
        let report = extractor(MockProvider::new(reply)).extract("Kerala").await.unwrap();

        assert_eq!(report.itinerary.days, 4);
        assert!(report.itinerary.is_domestic);
        assert_eq!(report.itinerary.slug, "kerala-backwaters-4d3n");
    }

    #[tokio::test]
    async fn test_both_strategies_share_one_shape() {
        let heuristic = ItineraryParser::default().parse(BALI).unwrap().itinerary;
        let reply = serde_json::to_string(&heuristic).unwrap();

        let report = extractor(MockProvider::new(reply)).extract(BALI).await.unwrap();
        assert_eq!(report.itinerary, heuristic);
    }

    #[tokio::test]
    async fn test_garbage_reply_is_an_upstream_failure() {
        let reply = "Sorry, I can only help with travel questions.";
        let err = extractor(MockProvider::new(reply)).extract("text").await.unwrap_err();
        assert_eq!(
            err,
            ExtractorError::UpstreamParseFailure {
                reason: "no JSON object in response".to_string(),
                preview: reply.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_preview_is_bounded() {
        let reply = format!("{{\"title\": {}", "x".repeat(500));
        let err = extractor(MockProvider::new(reply)).extract("text").await.unwrap_err();
        match err {
            ExtractorError::UpstreamParseFailure { preview, .. } => {
                assert_eq!(preview.chars().count(), 200);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let config = ExtractorConfig {
            extraction_timeout_secs: 1,
            ..Default::default()
        };
        let llm = MockProvider::new("{}").with_delay(Duration::from_millis(1500));
        let extractor = LlmExtractor::new(llm, config).unwrap();

        let err = extractor.extract("text").await.unwrap_err();
        assert_eq!(err, ExtractorError::Timeout);
    }

    #[tokio::test]
    async fn test_malformed_fields_are_reported_not_fatal() {
        let reply = r#"{"title": "Petra", "days": "five", "itinerary": "Day 1 Amman"}"#;
        let report = extractor(MockProvider::new(reply)).extract("text").await.unwrap();

        assert_eq!(report.itinerary.title, "Petra");
        assert!(report.itinerary.itinerary.is_empty());
        let fields: Vec<_> = report.failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["days", "itinerary"]);
    }
}
