//! Date-range presets anchored on the most recent record on file.
//!
//! Presets are computed relative to the entity's latest known vote date, not
//! the caller's wall clock, so "Last 2 Years" means "the 2 years preceding
//! the most recent record" even for politicians whose data is stale. The
//! current date is only used as an anchor when no boundary is known yet.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest/latest known record dates for the current entity.
///
/// Supplied by the backend; read-only here. Used to anchor presets and to
/// clamp date pickers, never to constrain what the user may type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBoundary {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Error returned when parsing an unrecognized preset name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date preset: {0:?} (expected last-year, last-2-years, last-5-years or all-time)")]
pub struct ParseDatePresetError(String);

/// Quick date-range choices offered alongside the explicit pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    LastYear,
    LastTwoYears,
    LastFiveYears,
    /// Clears the range entirely: both bounds become `None` (unbounded),
    /// not the known earliest/latest dates.
    AllTime,
}

impl DatePreset {
    /// Compute the `(from, to)` bounds for this preset relative to `anchor`,
    /// the latest known record date.
    #[must_use]
    pub fn range(self, anchor: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let years_back = match self {
            Self::AllTime => return (None, None),
            Self::LastYear => 1,
            Self::LastTwoYears => 2,
            Self::LastFiveYears => 5,
        };
        let from = anchor
            .checked_sub_months(Months::new(years_back * 12))
            .unwrap_or(anchor);
        (Some(from), Some(anchor))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastYear => "last-year",
            Self::LastTwoYears => "last-2-years",
            Self::LastFiveYears => "last-5-years",
            Self::AllTime => "all-time",
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = ParseDatePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last-year" => Ok(Self::LastYear),
            "last-2-years" => Ok(Self::LastTwoYears),
            "last-5-years" => Ok(Self::LastFiveYears),
            "all-time" => Ok(Self::AllTime),
            _ => Err(ParseDatePresetError(s.to_string())),
        }
    }
}
