//! The normalized query projection handed to the data-fetching layer.
//!
//! A [`QueryDescriptor`] is the serializable snapshot of filter plus page
//! state. It doubles as the cache key: two descriptors compare equal iff
//! every field is equal (multi-valued fields as sets), and equal descriptors
//! must map to the same cached result. The store only publishes a new
//! descriptor when it differs structurally from the previous one, so a
//! dependent fetch is never re-triggered spuriously.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::filter::{FilterState, PageState, SortOrder, VoteOutcome};

/// Date format used for the `date_from`/`date_to` request parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalized, serializable projection of filter and page state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    /// 1-based page number.
    pub page: u32,
    pub sort: SortOrder,
    /// Empty search text is normalized to `None` (parameter omitted).
    pub search: Option<String>,
    pub bill_types: BTreeSet<String>,
    pub vote_outcomes: BTreeSet<VoteOutcome>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub subject: Option<String>,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::derive(&FilterState::default(), PageState::default())
    }
}

impl QueryDescriptor {
    /// Project the current filter and page state into a descriptor.
    #[must_use]
    pub fn derive(filters: &FilterState, page: PageState) -> Self {
        let search = if filters.search_text.is_empty() {
            None
        } else {
            Some(filters.search_text.clone())
        };
        let subject = filters
            .subject
            .as_ref()
            .filter(|s| !s.is_empty())
            .cloned();
        Self {
            page: page.page,
            sort: page.sort,
            search,
            bill_types: filters.bill_types.clone(),
            vote_outcomes: filters.vote_outcomes.clone(),
            date_from: filters.date_from,
            date_to: filters.date_to,
            subject,
        }
    }

    /// Render the descriptor as HTTP request parameters.
    ///
    /// Multi-valued fields become repeated parameters (`type`, `vote_value`),
    /// dates render as `YYYY-MM-DD`, and empty/null fields are omitted
    /// entirely. The pair list is suitable for `reqwest`'s `query`.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ];
        for bill_type in &self.bill_types {
            pairs.push(("type", bill_type.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", to.format(DATE_FORMAT).to_string()));
        }
        for outcome in &self.vote_outcomes {
            pairs.push(("vote_value", outcome.as_str().to_string()));
        }
        if let Some(subject) = &self.subject {
            pairs.push(("subject", subject.clone()));
        }
        pairs
    }
}
