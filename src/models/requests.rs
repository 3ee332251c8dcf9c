//! Request DTOs for the civic cache API
//!
//! Defines the query parameters accepted by incoming HTTP requests.

use serde::Deserialize;

/// Query string for GET /data/:category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    /// Drop the cached value and fetch from the origin (pull-to-refresh)
    #[serde(default)]
    pub refresh: bool,
}
