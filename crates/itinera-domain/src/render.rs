//! Plain-text rendering of an itinerary
//!
//! The output uses the same conventions the heuristic parser reads: title
//! first, the duration label on its own line, `Day N: title` markers and
//! bulleted `Includes:` / `Excludes:` / `Highlights:` sections. Feeding the
//! rendering back into the parser leaves `nights`, `days` and `slug`
//! unchanged.

use crate::{DayEntry, ParsedItinerary};

impl ParsedItinerary {
    /// Render this record as a plain-text document
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();

        if !self.title.is_empty() {
            out.push(self.title.clone());
        }
        if !self.duration_display.is_empty() {
            out.push(self.duration_display.clone());
        }
        if let Some(subtitle) = self.subtitle.as_deref().filter(|s| !s.is_empty()) {
            out.push(subtitle.to_string());
        }
        if !self.description.is_empty() {
            out.push(self.description.clone());
        }

        for day in &self.itinerary {
            out.push(day_marker(day));
            if !day.description.is_empty() {
                out.push(day.description.clone());
            }
        }

        push_list(&mut out, "Includes:", &self.includes);
        push_list(&mut out, "Excludes:", &self.excludes);
        push_list(&mut out, "Highlights:", &self.highlights);

        out.join("\n")
    }
}

fn day_marker(day: &DayEntry) -> String {
    if day.title.is_empty() || day.title == DayEntry::default_title(day.day_number) {
        DayEntry::default_title(day.day_number)
    } else {
        format!("Day {}: {}", day.day_number, day.title)
    }
}

fn push_list(out: &mut Vec<String>, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push(header.to_string());
    out.extend(items.iter().map(|item| format!("- {}", item)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut day = DayEntry::new(1);
        day.title = "Arrival".to_string();
        day.description = "Transfer to hotel.".to_string();

        let record = ParsedItinerary {
            title: "Bali Escape".to_string(),
            nights: 4,
            days: 5,
            duration_display: "5 Days / 4 Nights".to_string(),
            itinerary: vec![day, DayEntry::new(2)],
            includes: vec!["Airport transfers".to_string()],
            ..Default::default()
        };

        assert_eq!(
            record.to_plain_text(),
            "Bali Escape\n5 Days / 4 Nights\nDay 1: Arrival\nTransfer to hotel.\nDay 2\nIncludes:\n- Airport transfers"
        );
    }

    #[test]
    fn test_render_empty_record() {
        assert_eq!(ParsedItinerary::default().to_plain_text(), "");
    }
}
