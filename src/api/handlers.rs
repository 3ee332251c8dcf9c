//! API Handlers
//!
//! HTTP request handlers over the shared cache and its repository.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{Category, TtlCache};
use crate::error::ApiError;
use crate::models::{
    ClearResponse, DataQuery, DataResponse, EntriesResponse, HealthResponse, InvalidateResponse,
    StatsResponse,
};
use crate::repository::CacheAsideRepository;

/// Application state shared across all handlers.
///
/// The repository and the cache-maintenance endpoints see the same cache
/// instance.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide cache
    pub cache: Arc<TtlCache>,
    /// Cache-aside access to every category
    pub repository: CacheAsideRepository,
}

impl AppState {
    /// Creates a new AppState around `repository` and the cache it wraps.
    pub fn new(repository: CacheAsideRepository) -> Self {
        Self {
            cache: Arc::clone(repository.cache()),
            repository,
        }
    }
}

fn parse_category(name: &str) -> Result<Category, ApiError> {
    name.parse()
        .map_err(|_| ApiError::UnknownCategory(name.to_string()))
}

/// Handler for GET /data/:category
///
/// Serves the category through the cache; `?refresh=true` invalidates first.
pub async fn data_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DataQuery>,
) -> Result<Json<DataResponse>, ApiError> {
    let category = parse_category(&name)?;

    if query.refresh {
        state.repository.invalidate(category);
    }
    let items = state.repository.fetch_json(category).await?;

    Ok(Json(DataResponse::new(category, items)))
}

/// Handler for DELETE /cache/:category
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<InvalidateResponse>, ApiError> {
    let category = parse_category(&name)?;
    state.repository.invalidate(category);

    Ok(Json(InvalidateResponse::new(category)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.len();
    state.cache.clear_all();

    Json(ClearResponse::cleared(removed))
}

/// Handler for POST /cache/clean
pub async fn clean_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::cleaned(state.cache.clean_expired()))
}

/// Handler for GET /cache
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    Json(EntriesResponse {
        entries: state.cache.entries(),
    })
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
