//! Pagination module
//!
//! Owns the authoritative cursor, consults the page cache, tracks in-flight
//! fetches, and applies completions in issue order.
//!
//! # Overview
//!
//! Navigation is two-phase. `request`, `refresh`, `next`, and `prev` decide
//! synchronously and return a [`Dispatch`]; when it carries a
//! [`FetchTicket`] the caller performs the fetch and hands the result back
//! to `complete`. Only the most recently issued fetch may change what is on
//! display, so a slow response can never overwrite a newer navigation.

mod controller;
mod types;

pub use controller::PaginationController;
pub use types::{Dispatch, FetchKind, FetchTicket, Outcome};

#[cfg(test)]
mod tests;
