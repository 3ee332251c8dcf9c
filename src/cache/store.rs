//! Cache Store Module
//!
//! Main cache engine: a type-erased map guarded by a readers-writer lock,
//! with TTL expiration enforced lazily on read.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::trace;

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Entry Info ==
/// Metadata about one stored entry, without its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// == TTL Cache ==
/// Thread-safe, type-erased key/value cache with per-entry TTL.
///
/// Reads share the lock, writes take it exclusively, and no lock is ever
/// held across anything but map operations. None of the operations fail:
/// a missing, expired, or differently-typed entry is simply a miss.
pub struct TtlCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    /// Time source for stamping and expiring entries
    clock: Arc<dyn Clock>,
    /// Performance statistics
    stats: StatsRecorder,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            clock,
            stats: StatsRecorder::default(),
        }
    }

    /// TTL used by `set` when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The previous value and its expiration are discarded, not merged.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses `default_ttl` if None)
    pub fn set<V>(&self, key: impl Into<String>, value: V, ttl: Option<Duration>)
    where
        V: Any + Send + Sync,
    {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        // Built before locking so the write section is a single insert.
        let entry = CacheEntry::new(value, ttl, self.clock.now());

        trace!(key = %key, ttl_secs = ttl.as_secs(), "cache set");
        self.entries.write().insert(key, entry);
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key` as a `V`.
    ///
    /// Returns None when the key is absent, when its entry has expired (the
    /// entry is removed as a side effect), or when it holds another type.
    pub fn get<V>(&self, key: &str) -> Option<V>
    where
        V: Clone + 'static,
    {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired_at(self.clock.now()) => {
                    return self.read_live(entry);
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock: evict under the write lock. A writer
        // may have refreshed the key in between, so check again.
        let mut entries = self.entries.write();
        let now = self.clock.now();
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => return self.read_live(entry),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            self.stats.record_expirations(1);
            trace!(key = %key, "cache entry expired on read");
        }
        self.stats.record_miss();
        None
    }

    fn read_live<V>(&self, entry: &CacheEntry) -> Option<V>
    where
        V: Clone + 'static,
    {
        let value = entry.value_as::<V>();
        if value.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_type_mismatch();
        }
        value
    }

    // == Contains ==
    /// Returns true if `key` holds a live entry of any type.
    ///
    /// Does not evict and does not touch statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now();
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    /// Remaining lifetime of the live entry under `key`.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_at(now))
    }

    // == Remove ==
    /// Discards the entry for `key`, if any.
    pub fn remove(&self, key: &str) {
        if self.entries.write().remove(key).is_some() {
            trace!(key = %key, "cache entry removed");
        }
    }

    // == Clear All ==
    /// Discards every entry.
    pub fn clear_all(&self) {
        self.entries.write().clear();
    }

    // == Clean Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Only reclaims memory; `get` enforces expiration on its own.
    /// Returns the number of entries removed.
    pub fn clean_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        drop(entries);

        self.stats.record_expirations(removed as u64);
        removed
    }

    // == Entries ==
    /// Snapshot of every stored entry's metadata, sorted by key.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let mut infos: Vec<EntryInfo> = self
            .entries
            .read()
            .iter()
            .map(|(key, entry)| EntryInfo {
                key: key.clone(),
                created_at: entry.created_at,
                expires_at: entry.expires_at,
            })
            .collect();
        infos.sort_by(|a, b| a.key.cmp(&b.key));
        infos
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("default_ttl", &self.default_ttl)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
