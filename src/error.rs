//! Error types for the civic cache service
//!
//! Cache operations themselves never fail; errors come from the origin data
//! source and from the HTTP layer that fronts the repositories.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::Category;

// == Fetch Error Enum ==
/// Failure while fetching a category from its origin.
///
/// Repositories hand this back to their caller unchanged and never cache it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout, or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Origin answered with a non-success status
    #[error("Origin returned status {status} for {category}")]
    Status { category: Category, status: u16 },

    /// Response body had an unusable shape
    #[error("Malformed response for {category}: {message}")]
    Decode { category: Category, message: String },

    /// Origin could not serve the request for another reason
    #[error("Origin unavailable: {0}")]
    Unavailable(String),
}

// == API Error Enum ==
/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path named no known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Origin fetch failed
    #[error(transparent)]
    Upstream(#[from] FetchError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for origin fetches.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = ApiError::UnknownCategory("traffic".into()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let upstream = ApiError::from(FetchError::Unavailable("down".into())).into_response();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let internal = ApiError::Internal("boom".into()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            category: Category::Cameras,
            status: 503,
        };
        assert_eq!(err.to_string(), "Origin returned status 503 for cameras");

        let upstream = ApiError::from(FetchError::Unavailable("offline".into()));
        assert_eq!(upstream.to_string(), "Origin unavailable: offline");
    }
}
