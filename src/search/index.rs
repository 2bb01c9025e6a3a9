//! Case-insensitive name filter

use crate::types::{Item, Page};

/// A search query, normalised once for repeated matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Create a query from user input
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The query as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// An empty query matches everything
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the item's name contains the query, ignoring case
    pub fn matches(&self, item: &Item) -> bool {
        self.needle.is_empty() || item.name.to_lowercase().contains(&self.needle)
    }

    /// Items of `page` matching this query, in page order
    pub fn filter<'a>(&self, page: &'a Page) -> Vec<&'a Item> {
        page.items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Items of `page` whose name contains `query`, ignoring case
///
/// Recomputed on every call. The result is always an order-preserving
/// subsequence of `page.items`, and the whole page for an empty query.
pub fn visible_items<'a>(page: &'a Page, query: &str) -> Vec<&'a Item> {
    SearchQuery::new(query).filter(page)
}
