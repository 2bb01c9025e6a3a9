//! Pagination controller

use super::types::{Dispatch, FetchKind, FetchTicket, Outcome};
use crate::cache::PageCache;
use crate::error::FetchError;
use crate::state::{BrowserState, BrowserStateMachine};
use crate::types::{cursor_label, Cursor, Page, RequestId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Orchestrates cache hits, fetches, and the displayed state
///
/// Single writer: the cache and the state machine are only ever mutated
/// through `&mut self`, so overlapping fetches need no locking. Every
/// `request` or `refresh` replaces the awaited request id; a completion whose
/// id is not the awaited one is stale and only feeds the cache.
#[derive(Debug)]
pub struct PaginationController {
    cache: PageCache,
    machine: BrowserStateMachine,
    /// Cursor of the page on display (meaningful once something loaded)
    current_cursor: Option<Cursor>,
    /// The only fetch allowed to change the displayed state
    awaited: Option<RequestId>,
    in_flight: HashMap<Option<Cursor>, RequestId>,
    last_issued: RequestId,
    /// page key -> key it was reached from by `next`
    back_links: HashMap<Option<Cursor>, Option<Cursor>>,
    /// page key -> key it was reached from by `prev`
    forward_links: HashMap<Option<Cursor>, Option<Cursor>>,
}

impl PaginationController {
    /// Create a controller with an unbounded cache
    pub fn new() -> Self {
        Self::with_cache(PageCache::new())
    }

    /// Create a controller around an existing cache
    pub fn with_cache(cache: PageCache) -> Self {
        Self {
            cache,
            machine: BrowserStateMachine::new(),
            current_cursor: None,
            awaited: None,
            in_flight: HashMap::new(),
            last_issued: RequestId::new(0),
            back_links: HashMap::new(),
            forward_links: HashMap::new(),
        }
    }

    pub fn state(&self) -> &BrowserState {
        self.machine.state()
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.machine.subscribe()
    }

    /// Cursor of the page on display
    pub fn current_cursor(&self) -> Option<&Cursor> {
        self.current_cursor.as_ref()
    }

    /// Last page displayed as ready
    pub fn last_known_page(&self) -> Option<&Arc<Page>> {
        self.machine.last_page()
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Number of fetches issued and not yet completed
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Id of the fetch whose result will be displayed, if one is pending
    pub fn awaited(&self) -> Option<RequestId> {
        self.awaited
    }

    /// Whether a following page is known
    pub fn has_next(&self) -> bool {
        self.last_known_page().is_some_and(|page| page.has_next())
    }

    /// Whether a preceding page is known
    pub fn has_previous(&self) -> bool {
        self.last_known_page()
            .is_some_and(|page| page.has_previous())
    }

    /// Navigate to the page identified by `cursor`
    ///
    /// Cache first: a cached page is adopted synchronously. Re-requesting
    /// the page already on display (ready or refreshing) does nothing.
    pub fn request(&mut self, cursor: Option<Cursor>) -> Dispatch {
        if self.is_showing(cursor.as_ref()) {
            debug!("Already showing {}", cursor_label(cursor.as_ref()));
            return Dispatch::Unchanged;
        }

        if let Some(page) = self.cache.get(cursor.as_ref()) {
            debug!("Cache hit for {}", cursor_label(cursor.as_ref()));
            self.awaited = None;
            self.adopt(cursor, page);
            return Dispatch::CacheHit;
        }

        debug!("Cache miss for {}", cursor_label(cursor.as_ref()));
        self.machine.begin_loading();
        self.dispatch(cursor, FetchKind::Navigate)
    }

    /// Re-fetch the page on display, bypassing the cache read
    ///
    /// The displayed items stay visible while the fetch is in flight and
    /// after it fails.
    pub fn refresh(&mut self) -> Dispatch {
        let cursor = self.current_cursor.clone();
        debug!("Refreshing {}", cursor_label(cursor.as_ref()));
        self.machine.begin_refresh();
        self.dispatch(cursor, FetchKind::Refresh)
    }

    /// Navigate to the page after the one on display
    pub fn next(&mut self) -> Dispatch {
        let Some(target) = self
            .last_known_page()
            .and_then(|page| page.next_cursor.clone())
        else {
            return Dispatch::Unchanged;
        };
        let from = self.current_cursor.clone();
        let target = self.forward_links.get(&from).cloned().unwrap_or(Some(target));
        self.back_links.insert(target.clone(), from);
        self.request(target)
    }

    /// Navigate to the page before the one on display
    pub fn prev(&mut self) -> Dispatch {
        let Some(target) = self
            .last_known_page()
            .and_then(|page| page.previous_cursor.clone())
        else {
            return Dispatch::Unchanged;
        };
        let from = self.current_cursor.clone();
        let target = self.back_links.get(&from).cloned().unwrap_or(Some(target));
        self.forward_links.insert(target.clone(), from);
        self.request(target)
    }

    /// Apply the result of a fetch issued by this controller
    ///
    /// Successful pages are always cached. The displayed state only changes
    /// when `ticket` is the awaited request.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page, FetchError>,
    ) -> Outcome {
        if self.in_flight.get(&ticket.cursor) == Some(&ticket.id) {
            self.in_flight.remove(&ticket.cursor);
        }
        let stale = self.awaited != Some(ticket.id);

        match result {
            Ok(page) => {
                let page = Arc::new(page);
                self.forget_changed_links(&ticket.cursor, &page);
                self.cache.put(ticket.cursor.clone(), Arc::clone(&page));
                if stale {
                    debug!(
                        "Discarding stale page {} for {}",
                        ticket.id,
                        cursor_label(ticket.cursor())
                    );
                    return Outcome::Discarded;
                }
                info!(
                    "Loaded {} items for {}",
                    page.len(),
                    cursor_label(ticket.cursor())
                );
                self.awaited = None;
                self.adopt(ticket.cursor, page);
                Outcome::Applied
            }
            Err(err) => {
                if stale {
                    debug!(
                        "Discarding stale failure {} for {}: {}",
                        ticket.id,
                        cursor_label(ticket.cursor()),
                        err
                    );
                    return Outcome::Discarded;
                }
                warn!("Fetch for {} failed: {}", cursor_label(ticket.cursor()), err);
                self.awaited = None;
                self.machine.fail(err);
                Outcome::Failed
            }
        }
    }

    fn is_showing(&self, cursor: Option<&Cursor>) -> bool {
        let showing = matches!(
            self.machine.state(),
            BrowserState::Ready { .. } | BrowserState::Refreshing { .. }
        );
        showing && self.current_cursor.as_ref() == cursor
    }

    /// Drop remembered neighbours of `key` whose server cursor changed
    ///
    /// A remembered link only stands in for the cursor reported by the page
    /// it was recorded against. Once a fresh copy reports a different
    /// neighbour, navigation follows the server again.
    fn forget_changed_links(&mut self, key: &Option<Cursor>, fresh: &Page) {
        let Some(entry) = self.cache.peek(key.as_ref()) else {
            return;
        };
        let old_next = entry.page.next_cursor.clone();
        let old_previous = entry.page.previous_cursor.clone();
        if old_next != fresh.next_cursor && self.forward_links.remove(key).is_some() {
            debug!("Next link of {} changed", cursor_label(key.as_ref()));
        }
        if old_previous != fresh.previous_cursor && self.back_links.remove(key).is_some() {
            debug!("Previous link of {} changed", cursor_label(key.as_ref()));
        }
    }

    fn adopt(&mut self, cursor: Option<Cursor>, page: Arc<Page>) {
        self.current_cursor = cursor;
        self.machine.resolve(page);
    }

    /// Await a fetch for `cursor`, joining one already in flight
    fn dispatch(&mut self, cursor: Option<Cursor>, kind: FetchKind) -> Dispatch {
        if let Some(&id) = self.in_flight.get(&cursor) {
            debug!("Joining in-flight fetch {} for {}", id, cursor_label(cursor.as_ref()));
            self.awaited = Some(id);
            return Dispatch::Joined(id);
        }

        self.last_issued = self.last_issued.next();
        let id = self.last_issued;
        self.in_flight.insert(cursor.clone(), id);
        self.awaited = Some(id);
        debug!("Issuing fetch {} for {}", id, cursor_label(cursor.as_ref()));

        Dispatch::Fetch(FetchTicket { id, cursor, kind })
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}
