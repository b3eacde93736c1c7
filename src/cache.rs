//! Short-TTL cache for fetched playlist text.
//!
//! Channel lists change rarely but get requested on every page load; a
//! small TTL keeps repeat requests off the upstream host without serving
//! stale lineups for long.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Debug)]
struct CachedText {
    body: String,
    fetched_at: Instant,
}

/// Thread-safe text cache with TTL-based invalidation, keyed by source URL.
#[derive(Clone, Debug)]
pub struct PlaylistCache {
    entries: Arc<DashMap<String, CachedText>>,
    ttl: Duration,
}

impl PlaylistCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Fresh cached text for `url`, or `None` on miss/expiry.
    pub fn get(&self, url: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(url) {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!("Playlist cache HIT for {}", url);
                return Some(entry.body.clone());
            }
            // Stale — drop the read guard before removing
            drop(entry);
            self.entries.remove(url);
        }
        debug!("Playlist cache MISS for {}", url);
        None
    }

    pub fn insert(&self, url: &str, body: String) {
        self.entries.insert(
            url.to_string(),
            CachedText {
                body,
                fetched_at: Instant::now(),
            },
        );
    }
}
