//! Gateway trait and wire format
//!
//! The collection endpoint answers with
//!
//! ```text
//! { "items": [{ "name": "...", "url": "..." }], "next": "..." | null, "previous": "..." | null }
//! ```
//!
//! `results` is accepted as an alias of `items`. The body is decoded into
//! [`CollectionResponse`] and then checked before it becomes a [`Page`], so
//! nothing malformed ever reaches the cache.

use crate::error::FetchError;
use crate::types::{Cursor, Item, Page};
use async_trait::async_trait;
use serde::Deserialize;

/// Performs one remote page retrieval
///
/// Implementations never retry. A `None` cursor asks for the endpoint's
/// default first page.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    /// Fetch and validate the page identified by `cursor`
    async fn fetch(&self, cursor: Option<&Cursor>) -> Result<Page, FetchError>;
}

/// Raw collection response as sent by the server
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse {
    #[serde(alias = "results")]
    pub items: Vec<WireItem>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Raw item entry
#[derive(Debug, Clone, Deserialize)]
pub struct WireItem {
    pub name: String,
    pub url: String,
}

impl CollectionResponse {
    /// Decode a response body
    pub fn from_body(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|e| FetchError::parse(e.to_string()))
    }

    /// Validate and convert into a page
    ///
    /// Every item needs a non-empty url since it doubles as the item's
    /// cursor. Empty `next`/`previous` strings mean "no such page".
    pub fn into_page(self) -> Result<Page, FetchError> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if item.url.trim().is_empty() {
                    return Err(FetchError::parse(format!("item {index} has an empty url")));
                }
                Ok(Item::new(item.name, item.url))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(
            items,
            non_empty_cursor(self.next),
            non_empty_cursor(self.previous),
        ))
    }
}

fn non_empty_cursor(raw: Option<String>) -> Option<Cursor> {
    raw.filter(|s| !s.trim().is_empty()).map(Cursor::from)
}

/// Decode and validate a collection response body in one step
pub fn parse_page(body: &str) -> Result<Page, FetchError> {
    CollectionResponse::from_body(body)?.into_page()
}
