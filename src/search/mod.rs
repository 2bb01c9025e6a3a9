//! Search module
//!
//! Client-side substring filtering over the page currently on display.
//! Searching never fetches; it only narrows what is already loaded.

mod index;

pub use index::{visible_items, SearchQuery};
