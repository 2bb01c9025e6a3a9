//! Common types used throughout pagebrowse
//!
//! The pagination vocabulary shared by every other module: cursors, items,
//! pages, and request ids.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque token identifying one page of a collection
///
/// Servers hand these out as absolute URLs, but nothing in the crate looks
/// inside except the HTTP gateway when it resolves the request target. The
/// absence of a page is modelled as `Option<Cursor>::None`; a `None` request
/// cursor means "the endpoint's default first page".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from its raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Human-readable label for an optional cursor, used in logs and CLI output
pub fn cursor_label(cursor: Option<&Cursor>) -> &str {
    cursor.map_or("<first page>", Cursor::as_str)
}

// ============================================================================
// Item / Page
// ============================================================================

/// One listed entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier (the item's detail URL)
    pub id: String,
    /// Display name, the field search matches against
    pub name: String,
    /// Cursor for fetching this item's detail
    pub reference: Cursor,
}

impl Item {
    /// Create an item whose id is its reference cursor
    pub fn new(name: impl Into<String>, reference: impl Into<Cursor>) -> Self {
        let reference = reference.into();
        Self {
            id: reference.as_str().to_string(),
            name: name.into(),
            reference,
        }
    }
}

/// One fetched batch of items plus its neighbouring cursors
///
/// Item order is significant and preserved from the wire to the display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Items in server order
    pub items: Vec<Item>,
    /// Cursor of the following page, if any
    pub next_cursor: Option<Cursor>,
    /// Cursor of the preceding page, if any
    pub previous_cursor: Option<Cursor>,
}

impl Page {
    /// Create a page
    pub fn new(
        items: Vec<Item>,
        next_cursor: Option<Cursor>,
        previous_cursor: Option<Cursor>,
    ) -> Self {
        Self {
            items,
            next_cursor,
            previous_cursor,
        }
    }

    /// Whether a following page exists
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.previous_cursor.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Request ids
// ============================================================================

/// Monotonically increasing id of an issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Create a request id from a raw counter value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id issued after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
