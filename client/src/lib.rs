#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Client for the RollCall politician and donor API.
//!
//! The filter/query core lives in the `rc-query` crate; this crate adds the
//! REST boundary ([`api`]), the browsing session that ties a politician to
//! its filter state ([`session`]), configuration ([`config`]) and the text
//! rendering used by the `rollcall` binary ([`render`]).

pub mod api;
pub mod config;
pub mod render;
pub mod session;
