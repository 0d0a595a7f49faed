//! RollCall API boundary.
//!
//! A trait-based HTTP client for the backend REST API:
//!
//! - [`RollCallApi`] - trait defining the operations this client consumes
//! - [`HttpRollCallClient`] - real implementation using reqwest
//! - [`mock::MockRollCallClient`] - scripted mock for unit tests (behind
//!   the `test-utils` feature)
//!
//! The filter core never sees this module; it hands over a
//! [`rc_query::QueryDescriptor`] and this layer turns it into request
//! parameters.

mod client;
mod types;

pub use client::{ApiError, HttpRollCallClient, RollCallApi};
pub use types::{DonationBreakdown, Donor, IndustrySlice, Paged, Politician, VoteRecord};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
