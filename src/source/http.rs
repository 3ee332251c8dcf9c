//! HTTP Data Source
//!
//! Fetches category payloads from a REST origin at `{base_url}/{category}`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::cache::Category;
use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::source::{DataSource, RawResponse};

/// REST origin client.
///
/// The request timeout is owned here; the cache never times anything out.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the origin settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.source_base_url.clone(),
            Duration::from_secs(config.fetch_timeout),
        )
    }

    /// URL serving `category`.
    pub fn endpoint(&self, category: Category) -> String {
        format!("{}/{}", self.base_url, category.cache_key())
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_raw(&self, category: Category) -> Result<RawResponse> {
        let url = self.endpoint(category);
        debug!(%category, %url, "Fetching from origin");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                category,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        RawResponse::from_json(category, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_category() {
        let source = HttpSource::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();

        assert_eq!(
            source.endpoint(Category::Cameras),
            "http://localhost:8080/api/cameras"
        );
        assert_eq!(source.endpoint(Category::Pois), "http://localhost:8080/api/pois");
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            source_base_url: "https://city.example/v1".to_string(),
            ..Config::default()
        };
        let source = HttpSource::from_config(&config).unwrap();

        assert_eq!(source.endpoint(Category::News), "https://city.example/v1/news");
    }

    #[tokio::test]
    async fn test_unreachable_origin_is_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let source = HttpSource::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let result = source.fetch_raw(Category::Weather).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
