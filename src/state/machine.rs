//! Browser state machine

use super::types::BrowserState;
use crate::error::FetchError;
use crate::types::Page;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

/// Derives the presentation state from pagination outcomes
///
/// The machine has no terminal state. It remembers the last page it showed
/// as `Ready` so `Refreshing` and `Error` can keep displaying it.
#[derive(Debug)]
pub struct BrowserStateMachine {
    state: BrowserState,
    last_page: Option<Arc<Page>>,
    tx: watch::Sender<BrowserState>,
}

impl BrowserStateMachine {
    /// Create a machine in the `Idle` state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BrowserState::Idle);
        Self {
            state: BrowserState::Idle,
            last_page: None,
            tx,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Last page displayed as `Ready`
    pub fn last_page(&self) -> Option<&Arc<Page>> {
        self.last_page.as_ref()
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.tx.subscribe()
    }

    /// A page that is not cached has been requested
    pub fn begin_loading(&mut self) {
        self.transition(BrowserState::Loading);
    }

    /// The displayed page is being re-fetched
    ///
    /// Keeps showing the last page; with nothing shown yet this is plain
    /// loading.
    pub fn begin_refresh(&mut self) {
        let next = match &self.last_page {
            Some(page) => BrowserState::Refreshing {
                page: Arc::clone(page),
            },
            None => BrowserState::Loading,
        };
        self.transition(next);
    }

    /// A page has been adopted, from the cache or a fetch
    pub fn resolve(&mut self, page: Arc<Page>) {
        self.last_page = Some(Arc::clone(&page));
        self.transition(BrowserState::Ready { page });
    }

    /// The awaited fetch failed
    pub fn fail(&mut self, detail: FetchError) {
        let page = self.last_page.clone();
        self.transition(BrowserState::Error { page, detail });
    }

    fn transition(&mut self, next: BrowserState) {
        trace!("Browser state {} -> {}", self.state.kind(), next.kind());
        self.state = next;
        self.tx.send_replace(self.state.clone());
    }
}

impl Default for BrowserStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
