//! Domain records and HTTP DTOs
//!
//! `records` holds the per-category domain types stored in the cache;
//! `requests` and `responses` shape the HTTP API bodies.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{Alert, Camera, Event, News, Poi, Record, Severity, Weather};
pub use requests::DataQuery;
pub use responses::{
    ClearResponse, DataResponse, EntriesResponse, HealthResponse, InvalidateResponse,
    StatsResponse,
};
