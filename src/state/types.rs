//! Browser state types

use crate::error::FetchError;
use crate::types::Page;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What the presentation layer should show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrowserState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for a page that is not cached
    Loading,
    /// A page is on display
    Ready {
        /// The displayed page
        page: Arc<Page>,
    },
    /// A page is on display while its replacement is fetched
    Refreshing {
        /// The page shown until the refresh resolves
        page: Arc<Page>,
    },
    /// The last fetch failed
    Error {
        /// Last successfully displayed page, `None` if nothing ever loaded
        page: Option<Arc<Page>>,
        /// Why the fetch failed
        detail: FetchError,
    },
}

/// Discriminant of [`BrowserState`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Idle,
    Loading,
    Ready,
    Refreshing,
    Error,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StateKind::Idle => "idle",
            StateKind::Loading => "loading",
            StateKind::Ready => "ready",
            StateKind::Refreshing => "refreshing",
            StateKind::Error => "error",
        };
        f.write_str(label)
    }
}

impl BrowserState {
    pub fn kind(&self) -> StateKind {
        match self {
            BrowserState::Idle => StateKind::Idle,
            BrowserState::Loading => StateKind::Loading,
            BrowserState::Ready { .. } => StateKind::Ready,
            BrowserState::Refreshing { .. } => StateKind::Refreshing,
            BrowserState::Error { .. } => StateKind::Error,
        }
    }

    /// The page whose items should be on screen, if any
    pub fn displayed_page(&self) -> Option<&Arc<Page>> {
        match self {
            BrowserState::Ready { page } | BrowserState::Refreshing { page } => Some(page),
            BrowserState::Error { page, .. } => page.as_ref(),
            BrowserState::Idle | BrowserState::Loading => None,
        }
    }

    /// Error detail when in the error state
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            BrowserState::Error { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Whether a fetch the user is waiting on is in progress
    pub fn is_busy(&self) -> bool {
        matches!(self, BrowserState::Loading | BrowserState::Refreshing { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BrowserState::Ready { .. })
    }
}
