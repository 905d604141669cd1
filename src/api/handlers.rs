//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Cache operations
//! are synchronous and short, so handlers call them directly.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, PurgeResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared cache handle
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Spawns the reclaimer when a sweep interval is configured, so this
    /// must run inside a Tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Cache::with_config(config.cache_config())?))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair with optional TTL in seconds.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs);
    state.cache.put(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Missing and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get_with_ttl(&key) {
        Some((value, ttl)) => Ok(Json(GetResponse::new(key, value, ttl))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Idempotent: deleting an absent key still answers 200.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.delete(&key);
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for POST /purge
///
/// Runs a sweep immediately instead of waiting for the reclaimer.
pub async fn purge_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    Json(PurgeResponse::new(state.cache.purge_expired()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    fn test_state(capacity: usize) -> AppState {
        let cache = Cache::with_config(CacheConfig::new(capacity).without_sweep()).unwrap();
        AppState::new(cache)
    }

    fn set_request(key: &str, value: &str, ttl: Option<u64>) -> Json<SetRequest> {
        Json(SetRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state(100);

        let request = set_request("test_key", "test_value", None);
        let result = set_handler(State(state.clone()), request).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "test_value");
        assert_eq!(response.ttl_remaining, None);
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state(100);

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_is_idempotent() {
        let state = test_state(100);

        set_handler(State(state.clone()), set_request("to_delete", "value", None))
            .await
            .unwrap();

        let first = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(first.deleted);

        let second = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(!second.deleted);

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stats_handler_counts_evictions() {
        let state = test_state(1);

        for (key, value) in [("a", "1"), ("b", "2")] {
            set_handler(State(state.clone()), set_request(key, value, None))
                .await
                .unwrap();
        }

        let response = stats_handler(State(state)).await;
        assert_eq!(response.evictions, 1);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.capacity, 1);
    }

    #[tokio::test]
    async fn test_purge_handler_removes_expired() {
        let state = test_state(10);
        state.cache.put("brief", "v", Some(Duration::from_millis(10)));
        state.cache.put("kept", "v", None);

        tokio::time::sleep(Duration::from_millis(50)).await;

        let response = purge_handler(State(state.clone())).await;
        assert_eq!(response.removed, 1);
        assert_eq!(state.cache.size(), 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state(100);

        let result = set_handler(State(state), set_request("", "value", None)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_app_state_from_config() {
        let config = Config {
            max_entries: 7,
            sweep_interval: 1,
            server_port: 0,
        };

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.cache.capacity(), 7);
        assert!(state.cache.is_sweeping());
        state.cache.shutdown().await;
    }
}
