//! In-memory origin serving fixed JSON payloads per category.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::cache::{Category, UnknownCategory};
use crate::error::{FetchError, Result};
use crate::source::{DataSource, RawResponse};

/// Origin backed by JSON held in memory.
///
/// Counts every `fetch_raw` call per category and can be told to fail or
/// to stall, which makes cache-aside behavior observable.
#[derive(Debug, Default)]
pub struct StaticSource {
    payloads: Mutex<HashMap<Category, Value>>,
    failing: Mutex<HashSet<Category>>,
    calls: Mutex<HashMap<Category, usize>>,
    delay: Option<Duration>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from an object keyed by category name, e.g.
    /// `{"weather": {...}, "alerts": [...]}`.
    pub fn from_json(document: Value) -> std::result::Result<Self, UnknownCategory> {
        let source = Self::new();
        if let Value::Object(map) = document {
            for (name, payload) in map {
                source.set_payload(name.parse()?, payload);
            }
        }
        Ok(source)
    }

    /// Adds a payload for `category`.
    pub fn with(self, category: Category, payload: Value) -> Self {
        self.set_payload(category, payload);
        self
    }

    /// Makes every fetch sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_payload(&self, category: Category, payload: Value) {
        self.payloads.lock().insert(category, payload);
    }

    /// Toggles failure for `category`.
    pub fn set_failing(&self, category: Category, failing: bool) {
        let mut set = self.failing.lock();
        if failing {
            set.insert(category);
        } else {
            set.remove(&category);
        }
    }

    /// Number of fetches issued for `category`.
    pub fn calls(&self, category: Category) -> usize {
        self.calls.lock().get(&category).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch_raw(&self, category: Category) -> Result<RawResponse> {
        *self.calls.lock().entry(category).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().contains(&category) {
            return Err(FetchError::Unavailable(format!("{} origin is down", category)));
        }

        let payload = self.payloads.lock().get(&category).cloned();
        match payload {
            Some(body) => RawResponse::from_json(category, body),
            None => Err(FetchError::Status {
                category,
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_serves_payload_and_counts() {
        let source = StaticSource::new().with(Category::News, json!([{"id": "n1"}]));

        let raw = source.fetch_raw(Category::News).await.unwrap();
        assert_eq!(raw.records.len(), 1);
        assert_eq!(source.calls(Category::News), 1);
        assert_eq!(source.calls(Category::Alerts), 0);
    }

    #[tokio::test]
    async fn test_missing_payload_is_not_found() {
        let source = StaticSource::new();

        let err = source.fetch_raw(Category::Pois).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(source.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_toggle() {
        let source = StaticSource::new().with(Category::Weather, json!({"temperature": 1.0}));

        source.set_failing(Category::Weather, true);
        assert!(source.fetch_raw(Category::Weather).await.is_err());

        source.set_failing(Category::Weather, false);
        assert!(source.fetch_raw(Category::Weather).await.is_ok());
        assert_eq!(source.calls(Category::Weather), 2);
    }

    #[test]
    fn test_from_json_document() {
        let source = StaticSource::from_json(json!({
            "weather": {"temperature": 20.0, "condition": "cloudy"},
            "alerts": []
        }))
        .unwrap();
        assert!(source.payloads.lock().contains_key(&Category::Weather));
        assert!(source.payloads.lock().contains_key(&Category::Alerts));

        let err = StaticSource::from_json(json!({"traffic": []})).unwrap_err();
        assert_eq!(err, UnknownCategory("traffic".to_string()));
    }
}
