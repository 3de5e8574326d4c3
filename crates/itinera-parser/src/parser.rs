//! Document-level driver tying the stages together

use crate::config::{OversizePolicy, ParserConfig};
use crate::day::DayBuilder;
use crate::duration::{is_duration_only, parse_duration, parse_duration_pair, strip_duration};
use crate::error::ParseError;
use crate::extract::{ExtractContext, FieldPipeline};
use crate::highlights::backfill;
use crate::lines::{check_text, decode, normalize_lines, truncate_chars};
use crate::postprocess::finalize;
use crate::segmenter::{transition, Emission, Section, Segmenter};
use itinera_domain::{
    DayEntry, ExtractionFailure, ParseId, ParseMetadata, ParseReport, ParsedItinerary,
    StayDuration, Strategy,
};
use std::time::Instant;
use tracing::{info, info_span, warn};

/// The heuristic itinerary parser
///
/// Holds no per-document state; one instance can parse any number of
/// documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct ItineraryParser {
    config: ParserConfig,
    pipeline: FieldPipeline,
}

impl ItineraryParser {
    /// Create a parser, validating the configuration
    pub fn new(config: ParserConfig) -> Result<Self, ParseError> {
        config.validate().map_err(ParseError::Config)?;
        Ok(Self {
            config,
            pipeline: FieldPipeline::standard(),
        })
    }

    /// Replace the field extractors
    pub fn with_pipeline(mut self, pipeline: FieldPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse raw document bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseReport, ParseError> {
        self.parse(decode(bytes)?)
    }

    /// Parse one document
    ///
    /// Only unusable input is an error. Every per-field problem is recovered
    /// and listed in [`ParseReport::failures`].
    pub fn parse(&self, text: &str) -> Result<ParseReport, ParseError> {
        let parse_id = ParseId::new();
        let span = info_span!("parse", parse_id = %parse_id);
        let _guard = span.enter();
        let start = Instant::now();

        check_text(text)?;
        let (text, truncated) = self.limit(text)?;

        let lines = normalize_lines(text);
        info!("Parsing document: {} lines", lines.len());

        let mut failures = Vec::new();
        let itinerary = self.build(&lines, &mut failures);

        let metadata = ParseMetadata {
            strategy: Strategy::Heuristic,
            line_count: lines.len(),
            day_count: itinerary.itinerary.len(),
            truncated,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Parse complete: {} days, {} recovered failures, slug '{}'",
            metadata.day_count,
            failures.len(),
            itinerary.slug
        );

        Ok(ParseReport {
            parse_id,
            itinerary,
            failures,
            metadata,
        })
    }

    fn limit<'t>(&self, text: &'t str) -> Result<(&'t str, bool), ParseError> {
        let max = self.config.max_input_length;
        let (head, cut) = truncate_chars(text, max);
        if !cut {
            return Ok((text, false));
        }
        match self.config.oversize_policy {
            OversizePolicy::Reject => Err(ParseError::TextTooLong(text.chars().count(), max)),
            OversizePolicy::Truncate => {
                warn!("Document exceeds {} chars, truncating", max);
                Ok((head, true))
            }
        }
    }

    fn build(&self, lines: &[String], failures: &mut Vec<ExtractionFailure>) -> ParsedItinerary {
        let mut doc = DocumentState::default();
        let mut segmenter = Segmenter::new();
        let ctx = ExtractContext {
            max_activity_name_len: self.config.max_activity_name_len,
        };

        let mut index = 0;
        while index < lines.len() {
            let line = &lines[index];
            index += 1;

            let (section, emission) = segmenter.feed(line);
            match emission {
                Emission::DayMarker(marker) => {
                    doc.flush(&self.pipeline, &ctx, failures);
                    let position = u32::try_from(doc.days.len() + 1).unwrap_or(u32::MAX);
                    doc.open = Some(DayBuilder::open(marker, position));
                }
                Emission::Header { inline } => {
                    doc.flush(&self.pipeline, &ctx, failures);
                    if let Some(item) = inline {
                        doc.push_item(section, item);
                    }
                }
                Emission::Content(text) => match section {
                    Section::Itinerary => {
                        if let Some(day) = doc.open.as_mut() {
                            day.push_line(text);
                        }
                    }
                    Section::General => {
                        let next = lines.get(index).map(String::as_str);
                        if self.general_line(&mut doc, &text, next) {
                            index += 1;
                        }
                    }
                    list => doc.push_item(list, text),
                },
                Emission::Discard => {}
            }
        }
        doc.flush(&self.pipeline, &ctx, failures);

        let mut record = doc.into_record();
        backfill(&mut record, self.config.highlight_fallback_limit);
        finalize(&mut record, &self.config);
        record
    }

    /// Route a line of the general section; returns true when the following
    /// line was consumed as the second half of a split duration
    fn general_line(&self, doc: &mut DocumentState, line: &str, next: Option<&str>) -> bool {
        doc.general_lines += 1;
        let scanning = doc.duration.is_none() && doc.general_lines <= self.config.duration_scan_lines;

        if scanning {
            if let Some(found) = parse_duration(line) {
                if doc.title.is_empty() {
                    doc.duration = Some(found.duration);
                    let rest = strip_duration(line, &found.span);
                    if !rest.is_empty() {
                        doc.title = rest;
                    }
                    return false;
                }
                if is_duration_only(line, &found.span) {
                    doc.duration = Some(found.duration);
                    return false;
                }
                // Prose mentioning a stay stays in the description; a lone
                // "3 nights" there is not the package length.
                if !found.single_unit {
                    doc.duration = Some(found.duration);
                }
                doc.description.push(line.to_string());
                return false;
            }

            let next_is_content = next.is_some_and(|n| {
                matches!(transition(Section::General, n).1, Emission::Content(_))
            });
            if let Some(pair) = next.filter(|_| next_is_content).and_then(|n| parse_duration_pair(line, n)) {
                doc.duration = Some(pair);
                return true;
            }
        }

        if doc.title.is_empty() {
            doc.title = line.to_string();
        } else {
            doc.description.push(line.to_string());
        }
        false
    }
}

impl Default for ItineraryParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
            pipeline: FieldPipeline::standard(),
        }
    }
}

#[derive(Default)]
struct DocumentState {
    title: String,
    description: Vec<String>,
    duration: Option<StayDuration>,
    general_lines: usize,
    days: Vec<DayEntry>,
    open: Option<DayBuilder>,
    includes: Vec<String>,
    excludes: Vec<String>,
    highlights: Vec<String>,
}

impl DocumentState {
    fn flush(
        &mut self,
        pipeline: &FieldPipeline,
        ctx: &ExtractContext,
        failures: &mut Vec<ExtractionFailure>,
    ) {
        if let Some(day) = self.open.take() {
            self.days.push(day.finish(pipeline, ctx, failures));
        }
    }

    fn push_item(&mut self, section: Section, item: String) {
        match section {
            Section::Includes => self.includes.push(item),
            Section::Excludes => self.excludes.push(item),
            Section::Highlights => self.highlights.push(item),
            Section::General | Section::Itinerary => {}
        }
    }

    fn into_record(self) -> ParsedItinerary {
        let duration = self.duration.unwrap_or_default();
        ParsedItinerary {
            title: self.title,
            subtitle: None,
            description: self.description.join(" "),
            nights: duration.nights,
            days: duration.days,
            duration_display: if duration.is_unknown() {
                String::new()
            } else {
                duration.display()
            },
            itinerary: self.days,
            includes: self.includes,
            excludes: self.excludes,
            highlights: self.highlights,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_config() {
        let config = ParserConfig {
            max_input_length: 0,
            ..Default::default()
        };
        assert!(matches!(ItineraryParser::new(config), Err(ParseError::Config(_))));
    }

    #[test]
    fn test_title_with_inline_duration() {
        let report = ItineraryParser::default()
            .parse("Kerala Delight - 4N/5D\nBackwaters and hills.")
            .unwrap();
        assert_eq!(report.itinerary.title, "Kerala Delight");
        assert_eq!(report.itinerary.duration_display, "5 Days / 4 Nights");
        assert_eq!(report.itinerary.description, "Backwaters and hills.");
    }

    #[test]
    fn test_prose_with_duration_keeps_its_text() {
        let parser = ItineraryParser::default();

        let report = parser
            .parse("Bali Escape
We spend 3 nights in Ubud among rice fields.")
            .unwrap();
        assert_eq!(report.itinerary.description, "We spend 3 nights in Ubud among rice fields.");
        assert_eq!((report.itinerary.nights, report.itinerary.days), (0, 0));

        let report = parser
            .parse("Nile Cruise
A relaxing cruise of 5 Days / 4 Nights on the river.")
            .unwrap();
        assert_eq!(report.itinerary.description, "A relaxing cruise of 5 Days / 4 Nights on the river.");
        assert_eq!((report.itinerary.nights, report.itinerary.days), (4, 5));
    }

    #[test]
    fn test_labelled_duration_line_is_consumed() {
        let report = ItineraryParser::default()
            .parse("Goa Getaway
Duration: 4 Days / 3 Nights
Sun and sand.")
            .unwrap();
        assert_eq!(report.itinerary.description, "Sun and sand.");
        assert_eq!((report.itinerary.nights, report.itinerary.days), (3, 4));
    }

    #[test]
    fn test_duration_outside_scan_window_is_description() {
        let config = ParserConfig {
            duration_scan_lines: 2,
            ..Default::default()
        };
        let parser = ItineraryParser::new(config).unwrap();
        let report = parser.parse("Title\nLine one\nLine two\n3 Days / 2 Nights").unwrap();
        assert_eq!(report.itinerary.nights, 0);
        assert!(report.itinerary.description.ends_with("3 Days / 2 Nights"));
    }

    #[test]
    fn test_oversize_reject() {
        let config = ParserConfig {
            max_input_length: 10,
            oversize_policy: OversizePolicy::Reject,
            ..Default::default()
        };
        let parser = ItineraryParser::new(config).unwrap();
        let err = parser.parse("a document longer than ten characters").unwrap_err();
        assert!(matches!(err, ParseError::TextTooLong(_, 10)));
    }

    #[test]
    fn test_oversize_truncate() {
        let config = ParserConfig {
            max_input_length: 12,
            ..Default::default()
        };
        let parser = ItineraryParser::new(config).unwrap();
        let report = parser.parse("Bali Escape\nDay 1: Arrival").unwrap();
        assert!(report.metadata.truncated);
        assert_eq!(report.itinerary.title, "Bali Escape");
        assert!(report.itinerary.itinerary.is_empty());
    }

    #[test]
    fn test_binary_input_rejected() {
        let parser = ItineraryParser::default();
        assert!(matches!(parser.parse("PK\0\0"), Err(ParseError::InvalidInput(_))));
        assert!(matches!(parser.parse_bytes(&[0xff, 0xfe]), Err(ParseError::InvalidInput(_))));
    }

    #[test]
    fn test_inline_header_item() {
        let report = ItineraryParser::default()
            .parse("Trip\nIncludes: Airport transfers\n- Hotel")
            .unwrap();
        assert_eq!(report.itinerary.includes, vec!["Airport transfers", "Hotel"]);
    }

    #[test]
    fn test_metadata() {
        let report = ItineraryParser::default().parse("Trip\nDay 1\nDay 2").unwrap();
        assert_eq!(report.metadata.strategy, Strategy::Heuristic);
        assert_eq!(report.metadata.line_count, 3);
        assert_eq!(report.metadata.day_count, 2);
    }
}
