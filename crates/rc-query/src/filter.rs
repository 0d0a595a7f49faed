//! Filter and page state for the voting-record query.
//!
//! [`FilterState`] holds the user-chosen constraints; [`PageState`] holds
//! pagination and sort order. Both are plain data with pure transition
//! methods. Invalid combinations are normalized to the nearest valid state
//! rather than rejected: these types cannot fail.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort order for vote listings, by vote date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Ascending,
    /// Most recent votes first. The default.
    #[default]
    #[serde(rename = "DESC")]
    Descending,
}

impl SortOrder {
    /// Wire representation used in the `sort` request parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized vote-outcome string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vote outcome: {0:?} (expected Yea, Nay, Present or Not Voting)")]
pub struct ParseVoteOutcomeError(String);

/// How a politician can be recorded on a roll-call vote.
///
/// The set of values is fixed by the backend; the `vote_value` request
/// parameter accepts exactly these four strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoteOutcome {
    Yea,
    Nay,
    Present,
    #[serde(rename = "Not Voting")]
    NotVoting,
}

impl VoteOutcome {
    /// Wire representation used in the `vote_value` request parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yea => "Yea",
            Self::Nay => "Nay",
            Self::Present => "Present",
            Self::NotVoting => "Not Voting",
        }
    }

    /// All outcomes, in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Yea, Self::Nay, Self::Present, Self::NotVoting]
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteOutcome {
    type Err = ParseVoteOutcomeError;

    /// Accepts the wire spelling plus the hyphenated form used on the
    /// command line (`not-voting`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yea" => Ok(Self::Yea),
            "nay" => Ok(Self::Nay),
            "present" => Ok(Self::Present),
            "not voting" | "not-voting" | "not_voting" => Ok(Self::NotVoting),
            _ => Err(ParseVoteOutcomeError(s.to_string())),
        }
    }
}

/// Current 1-based page and sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub page: u32,
    pub sort: SortOrder,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            sort: SortOrder::Descending,
        }
    }
}

/// The user-chosen constraints on a politician's voting record.
///
/// Owned by one UI session, never persisted, and cleared whenever the
/// subject politician changes. Multi-valued fields are sets: membership is
/// the contract, ordering is not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search over bill titles and questions. This is the
    /// committed (post-debounce) value; the raw input lives in the store.
    pub search_text: String,
    /// Selected bill-type codes, e.g. `hr`, `s`, `hjres`.
    pub bill_types: BTreeSet<String>,
    /// Selected vote outcomes. Empty means no outcome filter (show all).
    pub vote_outcomes: BTreeSet<VoteOutcome>,
    /// Inclusive lower bound on the vote date; `None` is unbounded.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the vote date; `None` is unbounded.
    pub date_to: Option<NaiveDate>,
    /// Selected bill subject/topic, if any.
    pub subject: Option<String>,
}

impl FilterState {
    /// True when no constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Toggle a single bill type in or out of the selected set.
    pub fn toggle_bill_type(&mut self, code: &str) {
        if !self.bill_types.remove(code) {
            self.bill_types.insert(code.to_string());
        }
    }

    /// Set both date bounds at once.
    ///
    /// An inverted pair (`from` after `to`) is treated as invalid and both
    /// bounds are cleared. Fail-soft: never an error.
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        match (from, to) {
            (Some(f), Some(t)) if f > t => {
                self.date_from = None;
                self.date_to = None;
            }
            (f, t) => {
                self.date_from = f;
                self.date_to = t;
            }
        }
    }

    /// Set only the lower bound. If the new bound lands after the current
    /// upper bound, the upper bound is cleared rather than swapped.
    pub fn set_date_from(&mut self, from: Option<NaiveDate>) {
        if let (Some(f), Some(t)) = (from, self.date_to) {
            if f > t {
                self.date_to = None;
            }
        }
        self.date_from = from;
    }

    /// Set only the upper bound. If the new bound lands before the current
    /// lower bound, the lower bound is cleared rather than swapped.
    pub fn set_date_to(&mut self, to: Option<NaiveDate>) {
        if let (Some(f), Some(t)) = (self.date_from, to) {
            if f > t {
                self.date_from = None;
            }
        }
        self.date_to = to;
    }
}
