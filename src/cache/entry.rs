//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single type-erased value plus its expiration metadata.
///
/// The entry owns the payload; readers get a clone of the concrete type
/// they ask for, so storing `Arc<T>` keeps reads cheap for large values.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value
    value: Arc<dyn Any + Send + Sync>,
    /// Time the entry was written
    pub created_at: DateTime<Utc>,
    /// Absolute expiration instant
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry written at `now` that lives for `ttl`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - How long the entry stays live
    /// * `now` - Write time, taken from the cache's clock
    pub fn new<V>(value: V, ttl: Duration, now: DateTime<Utc>) -> Self
    where
        V: Any + Send + Sync,
    {
        Self {
            value: Arc::new(value),
            created_at: now,
            expires_at: expiry_after(now, ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// TTL of N seconds is live for reads strictly before the Nth second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Downcast ==
    /// Returns a clone of the value if it was stored as a `V`.
    pub fn value_as<V>(&self) -> Option<V>
    where
        V: Clone + 'static,
    {
        (*self.value).downcast_ref::<V>().cloned()
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

// == Utility Functions ==
/// Adds `ttl` to `now`, saturating at the latest representable instant.
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
