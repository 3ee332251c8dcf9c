//! API Routes
//!
//! Configures the Axum router with all civic cache endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clean_handler, clear_handler, data_handler, entries_handler, health_handler,
    invalidate_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /data/:category` - Cache-aside fetch (`?refresh=true` to bypass)
/// - `GET /cache` - List cached keys and their expiry
/// - `DELETE /cache` - Drop every entry
/// - `DELETE /cache/:category` - Invalidate one category
/// - `POST /cache/clean` - Sweep expired entries
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/data/:category", get(data_handler))
        .route("/cache", get(entries_handler).delete(clear_handler))
        .route("/cache/clean", post(clean_handler))
        .route("/cache/:category", delete(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
