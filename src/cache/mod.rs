//! Page cache module
//!
//! In-memory store of resolved pages keyed by the cursor that produced them.
//!
//! # Overview
//!
//! - `PageCache` - cursor → page map, last write wins
//! - `CacheEntry` - a cached page plus the time it was fetched
//! - `CacheStats` - hit/miss/eviction counters
//!
//! The cache is unbounded unless a capacity is configured, in which case the
//! least recently used entry is evicted on overflow.

mod page_cache;

pub use page_cache::{CacheEntry, CacheStats, PageCache};
