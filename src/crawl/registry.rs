// src/crawl/registry.rs
// =============================================================================
// The set of URLs that some task has already claimed for fetching.
//
// This is the only state shared between page tasks. The one operation
// that matters is `reserve`: the membership test and the insert happen
// under a single lock, so two tasks racing on the same URL cannot both
// win. There is no separate public insert.
//
// Entries are never removed while a crawl runs.
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    visited: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Claims `url` for the caller.
    //
    // Returns: true if the URL was new (the caller now owns the fetch),
    //          false if another task already claimed it
    pub fn reserve(&self, url: &str) -> bool {
        let mut visited = self.visited.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    // Optimistic membership check. The answer can be stale by the time
    // the caller acts on it; use `reserve` to actually claim a URL.
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(url)
    }

    pub fn len(&self) -> usize {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
