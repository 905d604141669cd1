//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Cache misses are not
//! errors: the library API reports them through `Option` and `bool`.
//! `NotFound` and `InvalidRequest` exist for the HTTP front-end.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The reclaimer was requested outside a Tokio runtime
    #[error("Background sweep requires a Tokio runtime")]
    RuntimeUnavailable,

    /// Key not found in cache, or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfig(_) | CacheError::RuntimeUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
