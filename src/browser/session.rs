//! Browser session

use crate::cache::PageCache;
use crate::config::BrowserConfig;
use crate::error::{FetchError, Result};
use crate::gateway::{FetchGateway, HttpGateway};
use crate::pagination::{Dispatch, FetchTicket, Outcome, PaginationController};
use crate::search::SearchQuery;
use crate::state::BrowserState;
use crate::types::{Cursor, Item, Page};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

type PendingFetch = BoxFuture<'static, (FetchTicket, std::result::Result<Page, FetchError>)>;

/// A browsing session over one collection endpoint
///
/// Navigation calls return immediately; fetches they start make progress
/// when the session is polled through [`Browser::poll_next_completion`] or
/// [`Browser::settle`]. There is no transport-level cancellation: a
/// superseded fetch runs to completion and its result is ignored.
pub struct Browser {
    controller: PaginationController,
    gateway: Arc<dyn FetchGateway>,
    pending: FuturesUnordered<PendingFetch>,
    query: SearchQuery,
}

impl Browser {
    /// Create a session with an unbounded cache
    pub fn new(gateway: Arc<dyn FetchGateway>) -> Self {
        Self::with_cache(gateway, PageCache::new())
    }

    /// Create a session with a specific cache
    pub fn with_cache(gateway: Arc<dyn FetchGateway>, cache: PageCache) -> Self {
        Self {
            controller: PaginationController::with_cache(cache),
            gateway,
            pending: FuturesUnordered::new(),
            query: SearchQuery::default(),
        }
    }

    /// Create an HTTP-backed session from configuration
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        config.validate()?;
        let gateway = HttpGateway::with_config(&config.endpoint, config.http.client_config())?;
        let cache = PageCache::from_capacity(config.cache.capacity);
        Ok(Self::with_cache(Arc::new(gateway), cache))
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Navigate to `cursor` (`None` = first page)
    pub fn request(&mut self, cursor: Option<Cursor>) -> Dispatch {
        let dispatch = self.controller.request(cursor);
        self.start(dispatch)
    }

    /// Re-fetch the displayed page
    pub fn refresh(&mut self) -> Dispatch {
        let dispatch = self.controller.refresh();
        self.start(dispatch)
    }

    /// Navigate to the following page
    pub fn next(&mut self) -> Dispatch {
        let dispatch = self.controller.next();
        self.start(dispatch)
    }

    /// Navigate to the preceding page
    pub fn prev(&mut self) -> Dispatch {
        let dispatch = self.controller.prev();
        self.start(dispatch)
    }

    /// Wait for the next in-flight fetch to finish and apply it
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn poll_next_completion(&mut self) -> Option<Outcome> {
        let (ticket, result) = self.pending.next().await?;
        Some(self.controller.complete(ticket, result))
    }

    /// Apply every in-flight fetch, returning the final state
    pub async fn settle(&mut self) -> &BrowserState {
        while self.poll_next_completion().await.is_some() {}
        self.controller.state()
    }

    /// Navigate and wait until the session is idle again
    pub async fn navigate(&mut self, cursor: Option<Cursor>) -> &BrowserState {
        self.request(cursor);
        self.settle().await
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Set the filter applied to the displayed page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Items of the displayed page matching the current query
    pub fn visible_items(&self) -> Vec<&Item> {
        self.controller
            .state()
            .displayed_page()
            .map(|page| self.query.filter(page))
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &BrowserState {
        self.controller.state()
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.controller.subscribe()
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    pub fn current_cursor(&self) -> Option<&Cursor> {
        self.controller.current_cursor()
    }

    /// When the displayed page was stored in the cache
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.controller.state().displayed_page()?;
        self.controller
            .cache()
            .peek(self.controller.current_cursor())
            .map(|entry| entry.fetched_at)
    }

    pub fn has_next(&self) -> bool {
        self.controller.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.controller.has_previous()
    }

    /// Whether fetches are still running, including superseded ones
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn start(&mut self, dispatch: Dispatch) -> Dispatch {
        if let Dispatch::Fetch(ticket) = &dispatch {
            let ticket = ticket.clone();
            let gateway = Arc::clone(&self.gateway);
            self.pending.push(Box::pin(async move {
                let result = gateway.fetch(ticket.cursor()).await;
                (ticket, result)
            }));
        }
        dispatch
    }
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("controller", &self.controller)
            .field("pending", &self.pending.len())
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
