//! Civic Cache - TTL-cached access to municipal information feeds
//!
//! A type-erased, thread-safe TTL cache shared by cache-aside repositories
//! for weather, alerts, cameras, events, news and points of interest.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use cache::{Category, TtlCache};
pub use config::Config;
pub use repository::CacheAsideRepository;
pub use tasks::spawn_cleanup_task;
