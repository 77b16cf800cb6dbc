use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Freshness ceiling for cached projections. Correctness does not depend on
/// it: every mutation explicitly removes the keys it can make stale.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached entry with TTL support
#[derive(Debug, Clone)]
struct CacheEntry {
    data: serde_json::Value,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(data: serde_json::Value, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// Read-through cache for denormalized read projections.
///
/// Keys are flat strings (see [`keys`]); values are stored as JSON so the
/// "list all" and "by id" projections of different entity types share one
/// store. Population races between concurrent misses are benign: both
/// writers populate from the same store state and last write wins.
#[derive(Debug)]
pub struct ReadCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ReadCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Get a cached projection if present and not expired. Expired or
    /// undecodable entries are dropped and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        // Clone out of the shard guard before any removal on the same key.
        let entry = self
            .entries
            .get(key)
            .map(|e| (e.data.clone(), e.is_expired()));

        let value = match entry {
            Some((data, false)) => {
                debug!("Cache hit for key: {}", key);
                data
            }
            Some((_, true)) => {
                self.entries.remove(key);
                debug!("Removed expired cache entry for key: {}", key);
                return None;
            }
            None => return None,
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Dropping undecodable cache entry for key {}: {}", key, e);
                self.entries.remove(key);
                None
            }
        }
    }

    /// Cache a projection under the fixed TTL. Best effort: a value that
    /// fails to serialize is skipped, never an operation failure.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(data) => {
                self.entries
                    .insert(key.to_string(), CacheEntry::new(data, self.ttl));
                debug!("Cached projection for key: {}", key);
            }
            Err(e) => {
                warn!("Failed to cache projection for key {}: {}", key, e);
            }
        }
    }

    /// Invalidate one key.
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
        debug!("Invalidated cache key: {}", key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReadCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key layout: one singleton key per "list all" projection and one
/// `<type>_<id>` key per cached entity instance.
pub mod keys {
    pub const MOVIES_ALL: &str = "movies_all";
    pub const ACTORS_ALL: &str = "actors_all";

    pub fn movie(id: i32) -> String {
        format!("movie_{}", id)
    }

    pub fn actor(id: i32) -> String {
        format!("actor_{}", id)
    }
}
