// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagebrowse
//!
//! A cursor-paginated, cached, searchable browsing engine for remote
//! collection endpoints.
//!
//! ## Features
//!
//! - **Cursor Pagination**: next/previous derived from server-supplied cursors
//! - **Cache First**: every resolved page is cached by the cursor that produced it
//! - **Stale-While-Revalidate**: refresh keeps the current items on screen
//! - **Issue-Order Results**: a slow, superseded fetch never overwrites a newer one
//! - **Client-Side Search**: case-insensitive substring filter over the current page
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagebrowse::{Browser, HttpGateway};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pagebrowse::Result<()> {
//!     let gateway = HttpGateway::new("https://pokeapi.co/api/v2/pokemon?limit=50")?;
//!     let mut browser = Browser::new(Arc::new(gateway));
//!
//!     browser.navigate(None).await;
//!     browser.set_query("saur");
//!     for item in browser.visible_items() {
//!         println!("{}", item.name);
//!     }
//!
//!     browser.next();
//!     browser.settle().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Browser                             │
//! │  request · next · prev · refresh · set_query · visible_items │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────────┬─────────────────┐
//! │  Pagination  │    State machine            │     Search      │
//! │  controller  │  Idle/Loading/Ready/        │  substring      │
//! │  staleness   │  Refreshing/Error           │  filter         │
//! ├──────────────┼─────────────────────────────┴─────────────────┤
//! │  Page cache  │  Fetch gateway  →  HTTP client (timeout, rate)│
//! └──────────────┴───────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Cursor, item, and page types
pub mod types;

/// Configuration loading
pub mod config;

/// HTTP client with timeout and rate limiting
pub mod http;

/// Page retrieval and response validation
pub mod gateway;

/// Cursor-keyed page cache
pub mod cache;

/// Client-side search over the displayed page
pub mod search;

/// Presentation state machine
pub mod state;

/// Pagination controller
pub mod pagination;

/// Browsing session driver
pub mod browser;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use browser::Browser;
pub use cache::PageCache;
pub use config::BrowserConfig;
pub use error::{Error, FetchError, Result};
pub use gateway::{FetchGateway, HttpGateway};
pub use pagination::{Dispatch, Outcome, PaginationController};
pub use search::visible_items;
pub use state::BrowserState;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
