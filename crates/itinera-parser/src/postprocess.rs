//! Record finalization: duration defaults, list hygiene, domestic flag, slug

use crate::config::ParserConfig;
use itinera_domain::{ParsedItinerary, StayDuration};
use std::collections::HashSet;
use tracing::debug;

/// Built-in gazetteer of domestic destinations, lower-case
///
/// Matching is plain substring containment, so short names are left out.
pub const DOMESTIC_GAZETTEER: &[&str] = &[
    "india", "goa", "kerala", "manali", "shimla", "kashmir", "ladakh", "rajasthan", "jaipur",
    "udaipur", "jodhpur", "jaisalmer", "agra", "delhi", "mumbai", "andaman", "darjeeling",
    "sikkim", "gangtok", "ooty", "munnar", "coorg", "rishikesh", "haridwar", "varanasi",
    "amritsar", "srinagar", "gulmarg", "pahalgam", "mysore", "hampi", "kodaikanal", "alleppey",
    "kochi", "meghalaya", "shillong", "nainital", "mussoorie", "uttarakhand", "himachal",
    "khajuraho", "pondicherry", "lakshadweep", "spiti", "kutch",
];

/// Slug used when a title has no usable characters
pub const FALLBACK_SLUG: &str = "package";

/// Fill defaults, clean lists and derive computed fields in place
pub fn finalize(record: &mut ParsedItinerary, config: &ParserConfig) {
    fill_duration(record);

    record.includes = clean_list(std::mem::take(&mut record.includes));
    record.excludes = clean_list(std::mem::take(&mut record.excludes));
    record.highlights = clean_list(std::mem::take(&mut record.highlights));

    record.is_domestic = is_domestic(&record.title, &record.description, &config.domestic_places);
    record.slug = generate_slug(&record.title, record.duration(), &record.duration_display);

    debug!(slug = %record.slug, domestic = record.is_domestic, "record finalized");
}

/// Infer a missing day count and synthesize the display label
///
/// A record with nights but no days gets `days = nights + 1`. The label is
/// only synthesized when it is empty; a custom source label is kept.
pub fn fill_duration(record: &mut ParsedItinerary) {
    if record.days == 0 && record.nights > 0 {
        record.days = StayDuration::from_nights(record.nights).days;
    }
    let duration = record.duration();
    if record.duration_display.trim().is_empty() && !duration.is_unknown() {
        record.duration_display = duration.display();
    }
}

/// Trim items, drop empties, de-duplicate case-insensitively keeping order
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && seen.insert(item.to_lowercase()))
        .collect()
}

/// Whether the title or description mentions a domestic place
pub fn is_domestic(title: &str, description: &str, places: &[String]) -> bool {
    let haystack = format!("{} {}", title, description).to_lowercase();
    places
        .iter()
        .map(|place| place.trim().to_lowercase())
        .any(|place| !place.is_empty() && haystack.contains(&place))
}

/// Lower-case ASCII alphanumeric runs joined by single hyphens
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the URL-safe record identifier
///
/// # Examples
///
/// ```
/// use itinera_domain::StayDuration;
/// use itinera_parser::postprocess::generate_slug;
///
/// let slug = generate_slug("Bali Escape!", StayDuration::new(4, 5), "5 Days / 4 Nights");
/// assert_eq!(slug, "bali-escape-5d4n");
/// ```
pub fn generate_slug(title: &str, duration: StayDuration, display: &str) -> String {
    let mut slug = slugify(title);
    if slug.is_empty() {
        slug = FALLBACK_SLUG.to_string();
    }

    let suffix = if duration.nights > 0 && duration.days > 0 {
        duration.slug_suffix()
    } else {
        slugify(display)
    };

    if !suffix.is_empty() {
        slug.push('-');
        slug.push_str(&suffix);
    }
    slug
}
