//! Day block accumulation and flushing

use crate::extract::{DayText, ExtractContext, FieldPipeline};
use crate::segmenter::DayMarker;
use itinera_domain::{DayEntry, ExtractionFailure};
use tracing::debug;

/// An open day collecting body lines until the next boundary
#[derive(Debug, Clone)]
pub struct DayBuilder {
    number: u32,
    title: Option<String>,
    lines: Vec<String>,
}

impl DayBuilder {
    /// Open a day from its marker
    ///
    /// A marker without a usable number (missing or zero) takes its 1-based
    /// position in the itinerary.
    pub fn open(marker: DayMarker, position: u32) -> Self {
        Self {
            number: marker.number.filter(|n| *n > 0).unwrap_or(position),
            title: marker.title.filter(|t| !t.trim().is_empty()),
            lines: Vec::new(),
        }
    }

    /// Day number this builder will emit
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Append a body line
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Run the field pipeline and produce the finished day
    pub fn finish(
        self,
        pipeline: &FieldPipeline,
        ctx: &ExtractContext,
        failures: &mut Vec<ExtractionFailure>,
    ) -> DayEntry {
        let mut entry = DayEntry::new(self.number);
        entry.description = self.lines.join(" ");

        let text = DayText {
            day_number: self.number,
            title: self.title.clone(),
            body: self.lines.join("\n"),
        };
        pipeline.run_day(&text, ctx, failures).apply_to(&mut entry);

        if let Some(title) = self.title {
            entry.title = title;
        }

        debug!(
            day = entry.day_number,
            lines = self.lines.len(),
            activities = entry.activities.len(),
            meals = entry.meals.len(),
            "day flushed"
        );
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_domain::Meal;

    fn marker(number: Option<u32>, title: Option<&str>) -> DayMarker {
        DayMarker {
            number,
            title: title.map(str::to_string),
        }
    }

    fn finish(builder: DayBuilder) -> (DayEntry, Vec<ExtractionFailure>) {
        let mut failures = Vec::new();
        let entry = builder.finish(&FieldPipeline::standard(), &ExtractContext::default(), &mut failures);
        (entry, failures)
    }

    #[test]
    fn test_number_falls_back_to_position() {
        assert_eq!(DayBuilder::open(marker(Some(4), None), 1).number(), 4);
        assert_eq!(DayBuilder::open(marker(None, None), 3).number(), 3);
        assert_eq!(DayBuilder::open(marker(Some(0), None), 2).number(), 2);
    }

    #[test]
    fn test_default_title() {
        let (entry, _) = finish(DayBuilder::open(marker(Some(3), Some("  ")), 1));
        assert_eq!(entry.title, "Day 3");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_description_is_space_joined() {
        let mut builder = DayBuilder::open(marker(Some(1), Some("Arrival in Bali")), 1);
        builder.push_line("Transfer from airport.");
        builder.push_line("Overnight at Bali.");
        let (entry, failures) = finish(builder);

        assert_eq!(entry.title, "Arrival in Bali");
        assert_eq!(entry.description, "Transfer from airport. Overnight at Bali.");
        assert_eq!(entry.overnight.as_deref(), Some("Bali"));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_title_only_day() {
        let (entry, _) = finish(DayBuilder::open(marker(Some(2), Some("Cairo - Luxor (B,D)")), 2));
        assert_eq!(entry.route_from.as_deref(), Some("Cairo"));
        assert_eq!(entry.route_to.as_deref(), Some("Luxor"));
        assert_eq!(entry.overnight.as_deref(), Some("Luxor"));
        assert_eq!(entry.meals, vec![Meal::Breakfast, Meal::Dinner]);
    }
}
