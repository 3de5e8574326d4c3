//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use itinera_domain::{DayEntry, ExtractionFailure, ParseReport, ParsedItinerary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the record of a parse report.
    pub fn format_report(&self, report: &ParseReport) -> Result<String> {
        let record = &report.itinerary;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_table(record)),
            OutputFormat::Text => Ok(record.to_plain_text()),
            OutputFormat::Quiet => Ok(record.slug.clone()),
        }
    }

    fn format_table(&self, record: &ParsedItinerary) -> String {
        let mut summary = Builder::default();
        summary.push_record(["Field", "Value"]);
        summary.push_record(["Title", record.title.as_str()]);
        if let Some(subtitle) = &record.subtitle {
            summary.push_record(["Subtitle", subtitle.as_str()]);
        }
        summary.push_record(["Duration", record.duration_display.as_str()]);
        summary.push_record(["Domestic", if record.is_domestic { "yes" } else { "no" }]);
        summary.push_record(["Slug", record.slug.as_str()]);
        summary.push_record(["Includes", record.includes.join("\n").as_str()]);
        summary.push_record(["Excludes", record.excludes.join("\n").as_str()]);
        summary.push_record(["Highlights", record.highlights.join("\n").as_str()]);

        let mut out = style(summary);

        if record.itinerary.is_empty() {
            out.push('\n');
            out.push_str(&self.colorize("No days found.", "yellow"));
            return out;
        }

        let mut days = Builder::default();
        days.push_record(["Day", "Title", "Route", "Overnight", "Meals", "Activities"]);
        for day in &record.itinerary {
            days.push_record(day_row(day));
        }
        out.push('\n');
        out.push_str(&style(days));
        out
    }

    /// Format a recovered extraction failure as a one-line warning.
    pub fn failure(&self, failure: &ExtractionFailure) -> String {
        self.warning(&failure.to_string())
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn day_row(day: &DayEntry) -> [String; 6] {
    let route = day
        .route()
        .map(|r| format!("{} → {}", r.from, r.to))
        .unwrap_or_default();
    let meals = day
        .meals
        .iter()
        .map(|m| m.code().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let activities = day
        .activities
        .iter()
        .map(|a| {
            if a.highlight {
                format!("{} *", a.name)
            } else {
                a.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    [
        day.day_number.to_string(),
        day.title.clone(),
        route,
        day.overnight.clone().unwrap_or_default(),
        meals,
        activities,
    ]
}

fn style(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
