//! Cache-Aside Repository
//!
//! Looks up a category's well-known key first and only goes to the origin
//! on a miss, storing the decoded batch for the default TTL.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{Category, TtlCache};
use crate::error::{FetchError, Result};
use crate::models::{Alert, Camera, Event, News, Poi, Record, Weather};
use crate::source::DataSource;

/// Per-category fetches shielded by the shared cache.
///
/// Each category moves between two states: nothing cached, or a live
/// `Arc<Vec<T>>` under its key. A successful origin fetch fills the key;
/// TTL expiry or [`invalidate`](Self::invalidate) empties it.
///
/// Two callers missing on the same key at once both go to the origin and
/// the last `set` wins. Failures are returned as-is and never cached.
#[derive(Clone)]
pub struct CacheAsideRepository {
    cache: Arc<TtlCache>,
    source: Arc<dyn DataSource>,
}

impl CacheAsideRepository {
    // == Constructor ==
    /// Creates a repository over the process-wide `cache`.
    ///
    /// # Arguments
    /// * `cache` - Shared cache, the same instance for every repository
    /// * `source` - Origin consulted on a miss
    pub fn new(cache: Arc<TtlCache>, source: Arc<dyn DataSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    // == Fetch ==
    /// Returns the cached batch for `T`, fetching it from the origin on a miss.
    ///
    /// Records that fail to decode are dropped from the batch. If the future
    /// is dropped while the origin call is pending, the cache is left as it was.
    pub async fn fetch<T: Record>(&self) -> Result<Arc<Vec<T>>> {
        let category = T::CATEGORY;
        let key = category.cache_key();

        if let Some(cached) = self.cache.get::<Arc<Vec<T>>>(key) {
            debug!(%category, "Cache hit");
            return Ok(cached);
        }
        debug!(%category, "Cache miss, fetching from origin");

        let raw = self.source.fetch_raw(category).await?;
        let received = raw.records.len();
        let records = Arc::new(raw.decode::<T>());

        self.cache.set(key, Arc::clone(&records), None);
        info!(
            %category,
            received,
            stored = records.len(),
            "Fetched from origin and cached"
        );

        Ok(records)
    }

    // == Invalidate ==
    /// Drops the cached batch for `category` so the next fetch hits the origin.
    pub fn invalidate(&self, category: Category) {
        self.cache.remove(category.cache_key());
        debug!(%category, "Cache invalidated");
    }

    /// Pull-to-refresh: invalidates `T`'s key, then fetches.
    pub async fn refresh<T: Record>(&self) -> Result<Arc<Vec<T>>> {
        self.invalidate(T::CATEGORY);
        self.fetch::<T>().await
    }

    // == Per-category fetches ==
    /// Current conditions; the origin serves a single record.
    pub async fn fetch_weather(&self) -> Result<Option<Weather>> {
        Ok(self.fetch::<Weather>().await?.first().cloned())
    }

    pub async fn fetch_alerts(&self) -> Result<Arc<Vec<Alert>>> {
        self.fetch().await
    }

    pub async fn fetch_cameras(&self) -> Result<Arc<Vec<Camera>>> {
        self.fetch().await
    }

    pub async fn fetch_events(&self) -> Result<Arc<Vec<Event>>> {
        self.fetch().await
    }

    pub async fn fetch_news(&self) -> Result<Arc<Vec<News>>> {
        self.fetch().await
    }

    pub async fn fetch_pois(&self) -> Result<Arc<Vec<Poi>>> {
        self.fetch().await
    }

    // == Untyped fetch ==
    /// Fetches `category` through its typed path and renders it as JSON.
    pub async fn fetch_json(&self, category: Category) -> Result<Value> {
        match category {
            Category::Weather => to_json::<Weather>(self.fetch().await?),
            Category::Alerts => to_json::<Alert>(self.fetch().await?),
            Category::Cameras => to_json::<Camera>(self.fetch().await?),
            Category::Events => to_json::<Event>(self.fetch().await?),
            Category::News => to_json::<News>(self.fetch().await?),
            Category::Pois => to_json::<Poi>(self.fetch().await?),
        }
    }
}

fn to_json<T: Record>(records: Arc<Vec<T>>) -> Result<Value> {
    serde_json::to_value(records.as_slice()).map_err(|err| FetchError::Decode {
        category: T::CATEGORY,
        message: err.to_string(),
    })
}
