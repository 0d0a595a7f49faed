//! Data types for RollCall API responses.

use chrono::NaiveDate;
use rc_query::VoteOutcome;
use serde::{Deserialize, Serialize};

/// A politician tracked by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Politician {
    /// Bioguide-style opaque identifier (e.g., "A000360")
    pub id: String,
    /// Full name
    pub name: String,
    /// State abbreviation (e.g., "TN")
    pub state: String,
    /// Party affiliation (e.g., "R", "D", "I")
    pub party: String,
    /// Chamber ("Senate" or "House")
    pub chamber: String,
}

/// A campaign donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Donor {
    pub id: String,
    pub name: String,
    /// State abbreviation, when disclosed
    pub state: Option<String>,
    /// Self-reported employer, when disclosed
    pub employer: Option<String>,
}

/// One roll-call vote as cast by the politician being inspected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub id: String,
    /// Bill-type code (e.g., "hr", "s", "hjres")
    pub bill_type: String,
    /// Bill number within its type (e.g., "3076")
    pub bill_number: String,
    /// The question voted on (e.g., "On Passage")
    pub question: String,
    pub description: Option<String>,
    /// Date the vote was taken
    pub date: NaiveDate,
    /// How this politician was recorded
    pub position: VoteOutcome,
    /// Overall result (e.g., "Passed", "Failed")
    pub result: String,
    /// Primary bill subject, when classified
    pub subject: Option<String>,
}

/// One page of results from a paginated endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// 1-based page this response covers
    pub current_page: u32,
    pub total_pages: u32,
    pub total_item_count: u64,
}

impl<T> Paged<T> {
    /// An empty first page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_item_count: 0,
        }
    }
}

/// Donation totals for one industry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndustrySlice {
    pub industry: String,
    /// Sum of itemized donations, in cents
    pub total_cents: i64,
    pub donation_count: u32,
}

/// Donation-by-industry breakdown for a politician.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DonationBreakdown {
    /// Slices in descending order of total, as returned by the backend.
    pub industries: Vec<IndustrySlice>,
}

impl DonationBreakdown {
    /// Sum across all industries, in cents. Saturates rather than wraps on
    /// absurd totals.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.industries
            .iter()
            .fold(0_i64, |acc, s| acc.saturating_add(s.total_cents))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn paged_deserializes_backend_shape() {
        let json = r#"{
            "items": [{"id": "A000360", "name": "Lamar Alexander",
                       "state": "TN", "party": "R", "chamber": "Senate"}],
            "current_page": 2,
            "total_pages": 10,
            "total_item_count": 193
        }"#;
        let page: Paged<Politician> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Lamar Alexander");
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_item_count, 193);
    }

    #[test]
    fn vote_record_deserializes_with_wire_outcome_spelling() {
        let json = r#"{
            "id": "h2023-512",
            "bill_type": "hr",
            "bill_number": "3076",
            "question": "On Passage",
            "description": null,
            "date": "2023-11-14",
            "position": "Not Voting",
            "result": "Passed",
            "subject": "Postal Service"
        }"#;
        let vote: VoteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(vote.position, VoteOutcome::NotVoting);
        assert_eq!(vote.date.to_string(), "2023-11-14");
    }

    #[test]
    fn breakdown_total_sums_slices() {
        let breakdown = DonationBreakdown {
            industries: vec![
                IndustrySlice {
                    industry: "Health".into(),
                    total_cents: 1_250_00,
                    donation_count: 4,
                },
                IndustrySlice {
                    industry: "Energy".into(),
                    total_cents: 750_00,
                    donation_count: 2,
                },
            ],
        };
        assert_eq!(breakdown.total_cents(), 2_000_00);
        assert_eq!(DonationBreakdown::default().total_cents(), 0);
    }
}
