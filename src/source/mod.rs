//! Data Source Module
//!
//! The origin side of the cache-aside pattern: raw category payloads and
//! the per-record decoding that turns them into domain records.

mod fixture;
mod http;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::cache::Category;
use crate::error::{FetchError, Result};

pub use fixture::StaticSource;
pub use http::HttpSource;

// == Data Source Trait ==
/// Origin for category data (REST endpoint, document store, fixture...).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the raw payload for `category`.
    async fn fetch_raw(&self, category: Category) -> Result<RawResponse>;
}

// == Raw Response ==
/// Undecoded records returned by an origin for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub category: Category,
    pub records: Vec<Value>,
}

impl RawResponse {
    pub fn new(category: Category, records: Vec<Value>) -> Self {
        Self { category, records }
    }

    /// Splits a JSON body into records.
    ///
    /// Accepts a bare array, an object wrapping an `items` or `documents`
    /// array, or a single object taken as one record.
    pub fn from_json(category: Category, body: Value) -> Result<Self> {
        let records = match body {
            Value::Array(records) => records,
            Value::Object(mut map) => {
                match map.remove("items").or_else(|| map.remove("documents")) {
                    Some(Value::Array(records)) => records,
                    Some(other) => {
                        return Err(FetchError::Decode {
                            category,
                            message: format!("expected record array, found {}", kind(&other)),
                        })
                    }
                    None => vec![Value::Object(map)],
                }
            }
            other => {
                return Err(FetchError::Decode {
                    category,
                    message: format!("expected array or object, found {}", kind(&other)),
                })
            }
        };

        Ok(Self::new(category, records))
    }

    /// Decodes every record as `T`, skipping the ones that do not fit.
    pub fn decode<T>(&self) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match T::deserialize(record) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    warn!(
                        category = %self.category,
                        index,
                        error = %err,
                        "Skipping malformed record"
                    );
                    None
                }
            })
            .collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
