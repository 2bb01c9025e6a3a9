//! Page cache implementation

use crate::types::{cursor_label, Cursor, Page};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A cached page
///
/// The page is shared behind an `Arc` and never mutated; a refresh replaces
/// the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The resolved page
    pub page: Arc<Page>,
    /// When the page was stored
    pub fetched_at: DateTime<Utc>,
    last_used: u64,
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a page
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries dropped to honour the capacity
    pub evictions: u64,
}

/// Cursor-keyed page store
///
/// Keys are `Option<Cursor>` so the endpoint's default first page (`None`)
/// is cached like any other.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<Option<Cursor>, CacheEntry>,
    capacity: Option<usize>,
    tick: u64,
    stats: CacheStats,
}

impl PageCache {
    /// Create an unbounded cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` pages
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// Create a cache from an optional capacity (`None` = unbounded)
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        capacity.map_or_else(Self::new, Self::with_capacity)
    }

    /// Look up the page for a cursor, counting the hit or miss
    pub fn get(&mut self, cursor: Option<&Cursor>) -> Option<Arc<Page>> {
        self.tick += 1;
        let tick = self.tick;
        match self.entries.get_mut(&cursor.cloned()) {
            Some(entry) => {
                entry.last_used = tick;
                self.stats.hits += 1;
                Some(Arc::clone(&entry.page))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Look up an entry without touching recency or counters
    pub fn peek(&self, cursor: Option<&Cursor>) -> Option<&CacheEntry> {
        self.entries.get(&cursor.cloned())
    }

    /// Store a page, replacing any previous entry for the cursor
    pub fn put(&mut self, cursor: Option<Cursor>, page: Arc<Page>) {
        self.tick += 1;
        let entry = CacheEntry {
            page,
            fetched_at: Utc::now(),
            last_used: self.tick,
        };
        let replaced = self.entries.insert(cursor, entry).is_some();
        if !replaced {
            self.evict_overflow();
        }
    }

    /// Whether a page is cached for the cursor
    pub fn contains(&self, cursor: Option<&Cursor>) -> bool {
        self.entries.contains_key(&cursor.cloned())
    }

    /// Drop every cached page
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity, `None` when unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn evict_overflow(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity {
            let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            debug!("Evicting cached page {}", cursor_label(victim.as_ref()));
            self.entries.remove(&victim);
            self.stats.evictions += 1;
        }
    }
}
