//! API Module
//!
//! HTTP handlers and routing in front of the cache-aside repository.
//!
//! # Endpoints
//! - `GET /data/:category` - Fetch a category through the cache
//! - `GET /cache`, `DELETE /cache`, `DELETE /cache/:category`, `POST /cache/clean`
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
