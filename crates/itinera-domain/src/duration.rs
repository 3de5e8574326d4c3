//! Trip length as a nights/days pair

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a package
///
/// Sources state this either nights-first ("4N/5D") or days-first
/// ("5 Days / 4 Nights"); both resolve to the same value and the same
/// display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StayDuration {
    /// Number of nights
    pub nights: u32,

    /// Number of days
    pub days: u32,
}

impl StayDuration {
    /// Create a duration from explicit nights and days
    pub fn new(nights: u32, days: u32) -> Self {
        Self { nights, days }
    }

    /// Infer a duration when only the day count is known
    ///
    /// # Examples
    ///
    /// ```
    /// use itinera_domain::StayDuration;
    ///
    /// assert_eq!(StayDuration::from_days(5), StayDuration::new(4, 5));
    /// assert_eq!(StayDuration::from_days(0), StayDuration::new(0, 0));
    /// ```
    pub fn from_days(days: u32) -> Self {
        Self::new(days.saturating_sub(1), days)
    }

    /// Infer a duration when only the night count is known
    pub fn from_nights(nights: u32) -> Self {
        Self::new(nights, nights.saturating_add(1))
    }

    /// Whether neither nights nor days is known
    pub fn is_unknown(&self) -> bool {
        self.nights == 0 && self.days == 0
    }

    /// Canonical label, always days first
    ///
    /// # Examples
    ///
    /// ```
    /// use itinera_domain::StayDuration;
    ///
    /// assert_eq!(StayDuration::new(9, 10).display(), "10 Days / 9 Nights");
    /// ```
    pub fn display(&self) -> String {
        format!("{} Days / {} Nights", self.days, self.nights)
    }

    /// Compact slug suffix, e.g. `5d4n`
    pub fn slug_suffix(&self) -> String {
        format!("{}d{}n", self.days, self.nights)
    }
}

impl fmt::Display for StayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
