//! Response DTOs for the civic cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, Category, EntryInfo};

/// Response body for GET /data/:category
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    /// Category served
    pub category: Category,
    /// Number of records in `items`
    pub count: usize,
    /// Decoded records
    pub items: Value,
}

impl DataResponse {
    /// Creates a new DataResponse, counting `items` when it is an array
    pub fn new(category: Category, items: Value) -> Self {
        let count = items.as_array().map_or(0, Vec::len);
        Self {
            category,
            count,
            items,
        }
    }
}

/// Response body for DELETE /cache/:category
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub key: String,
}

impl InvalidateResponse {
    pub fn new(category: Category) -> Self {
        Self {
            message: format!("Key '{}' invalidated", category),
            key: category.cache_key().to_string(),
        }
    }
}

/// Response body for DELETE /cache and POST /cache/clean
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub removed: usize,
}

impl ClearResponse {
    pub fn cleared(removed: usize) -> Self {
        Self {
            message: "Cache cleared".to_string(),
            removed,
        }
    }

    pub fn cleaned(removed: usize) -> Self {
        Self {
            message: format!("Removed {} expired entries", removed),
            removed,
        }
    }
}

/// Response body for GET /cache
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryInfo>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries dropped on expiry
    pub expirations: u64,
    /// Number of reads that found another type under the key
    pub type_mismatches: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            type_mismatches: stats.type_mismatches,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_response_counts_items() {
        let resp = DataResponse::new(Category::Alerts, json!([{"id": 1}, {"id": 2}]));
        assert_eq!(resp.count, 2);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["category"], "alerts");
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new(Category::Cameras);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("cameras"));
        assert!(json.contains("invalidated"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..CacheStats::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_clear_response_messages() {
        assert_eq!(ClearResponse::cleaned(3).message, "Removed 3 expired entries");
        assert_eq!(ClearResponse::cleared(2).removed, 2);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
