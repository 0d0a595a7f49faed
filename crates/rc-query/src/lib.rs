#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Filter state and query synchronization for the RollCall voting-record
//! API.
//!
//! This crate holds the client-side source of truth for one browsing
//! session: which constraints the user has selected ([`FilterState`]), where
//! they are in the result list ([`PageState`]), and the normalized
//! projection of both that the data-fetching layer turns into request
//! parameters ([`QueryDescriptor`]).
//!
//! The moving parts:
//!
//! - [`FilterStore`] - shared, interior-mutability state holder. Every
//!   mutation except [`FilterStore::set_page`] resets pagination to page 1;
//!   an entity switch resets everything. Changes are published on a watch
//!   channel only when the derived descriptor actually changed.
//! - [`SearchDebouncer`] - cancellable 300 ms timer between keystrokes and
//!   the committed search value.
//! - [`DatePreset`] - quick ranges anchored on the entity's latest known
//!   record date, supplied externally as a [`DateBoundary`].
//!
//! The crate performs no I/O and has no failure modes: invalid input (an
//! inverted date range, page 0) is normalized, never rejected.

pub mod debounce;
pub mod descriptor;
pub mod filter;
pub mod presets;
pub mod store;

pub use debounce::{SearchDebouncer, SEARCH_DEBOUNCE};
pub use descriptor::QueryDescriptor;
pub use filter::{FilterState, PageState, SortOrder, VoteOutcome};
pub use presets::{DateBoundary, DatePreset};
pub use store::FilterStore;
