//! Pagination types
//!
//! Tickets and the results of dispatching and completing them.

use crate::types::{Cursor, RequestId};

/// Why a fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Navigation to a page that was not cached
    Navigate,
    /// Re-fetch of the displayed page, bypassing the cache
    Refresh,
}

/// A fetch the controller wants performed
///
/// Hand it back to `PaginationController::complete` together with the
/// gateway's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) id: RequestId,
    pub(crate) cursor: Option<Cursor>,
    pub(crate) kind: FetchKind,
}

impl FetchTicket {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Cursor to fetch, `None` for the default first page
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }
}

/// What a navigation call decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to do: already showing that page, or no such neighbour
    Unchanged,
    /// Adopted a cached page without touching the network
    CacheHit,
    /// A fetch for the same cursor was already in flight and is now awaited
    Joined(RequestId),
    /// A new fetch must be performed
    Fetch(FetchTicket),
}

impl Dispatch {
    /// The fetch to perform, if any
    pub fn into_ticket(self) -> Option<FetchTicket> {
        match self {
            Dispatch::Fetch(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Dispatch::Fetch(_))
    }
}

/// What completing a fetch did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The page is now on display
    Applied,
    /// The fetch failed and the error is now on display
    Failed,
    /// The fetch was superseded; at most the cache changed
    Discarded,
}
