//! HTTP handlers for the Edudir serve crate

use crate::cache::{CachedResponse, ResponseCacheKey, SharedResponseCache};
use crate::error::{ApiError, FieldError, Location};
use crate::validation::{json_rejection, query_rejection, PageQuery, SearchRequest};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    response::{IntoResponse, Json, Response},
};
use edudir_core::QueryEngine;
use serde::{Deserialize, Serialize};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
    /// `None` when response caching is disabled
    pub cache: Option<SharedResponseCache>,
}

impl AppState {
    /// Create application state
    pub fn new(engine: QueryEngine, cache: Option<SharedResponseCache>) -> Self {
        Self { engine, cache }
    }
}

/// Serve from cache, or compute, serialize and store
///
/// The body is serialized once and the same bytes are returned and cached,
/// so hits and misses are indistinguishable to clients.
async fn cached_json<T, F>(
    state: &AppState,
    key: ResponseCacheKey,
    compute: F,
) -> Result<Response, ApiError>
where
    T: Serialize,
    F: FnOnce(&QueryEngine) -> T,
{
    if let Some(cache) = &state.cache {
        if let Some(hit) = cache.get(&key).await {
            return Ok(hit.into_response());
        }
    }

    let response = CachedResponse::new(serde_json::to_string(&compute(&state.engine))?);

    if let Some(cache) = &state.cache {
        cache.set(key, response.clone()).await;
    }

    Ok(response.into_response())
}

fn path_param(param: Result<Path<String>, PathRejection>, field: &str) -> Result<String, ApiError> {
    param.map(|Path(value)| value).map_err(|rejection| {
        ApiError::field(FieldError::new(
            field,
            Location::Params,
            rejection.body_text(),
        ))
    })
}

/// Handler for `GET /colleges/total`
pub async fn handle_total(State(state): State<AppState>) -> impl IntoResponse {
    Json(TotalResponse {
        total: state.engine.total(),
    })
}

/// Handler for `POST /colleges/search`
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(json_rejection)?;
    let search = request.validate()?;

    tracing::info!(
        keyword = %search.keyword,
        page = search.page.page(),
        limit = search.page.limit(),
        "Searching colleges"
    );

    let key = ResponseCacheKey::Search {
        keyword: search.keyword.clone(),
        page: search.page.page(),
        limit: search.page.limit(),
    };
    cached_json(&state, key, |engine| {
        engine.search_by_keyword(&search.keyword, search.page)
    })
    .await
}

/// Handler for `GET /colleges/state/:state`
pub async fn handle_by_state(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let name = path_param(path, "state")?;
    let Query(query) = query.map_err(|rejection| query_rejection(rejection.body_text()))?;
    let request = query.validate()?;

    tracing::info!(
        state = %name,
        page = request.page(),
        limit = request.limit(),
        "Filtering colleges by state"
    );

    let key = ResponseCacheKey::State {
        state: name.clone(),
        page: request.page(),
        limit: request.limit(),
    };
    cached_json(&state, key, |engine| engine.filter_by_state(&name, request)).await
}

/// Handler for `GET /colleges/district/:district`
pub async fn handle_by_district(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let district = path_param(path, "district")?;
    let Query(query) = query.map_err(|rejection| query_rejection(rejection.body_text()))?;
    let request = query.validate()?;

    tracing::info!(
        district = %district,
        page = request.page(),
        limit = request.limit(),
        "Filtering colleges by district"
    );

    let key = ResponseCacheKey::District {
        district: district.clone(),
        page: request.page(),
        limit: request.limit(),
    };
    cached_json(&state, key, |engine| {
        engine.filter_by_district(&district, request)
    })
    .await
}

/// Handler for `GET /allstates`
pub async fn handle_all_states(State(state): State<AppState>) -> Result<Response, ApiError> {
    tracing::info!("Listing states");
    cached_json(&state, ResponseCacheKey::AllStates, |engine| {
        engine.list_distinct_states()
    })
    .await
}

/// Handler for `GET /districts/:state`
pub async fn handle_districts(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let name = path_param(path, "state")?;
    tracing::info!(state = %name, "Listing districts");

    let key = ResponseCacheKey::Districts {
        state: name.clone(),
    };
    cached_json(&state, key, |engine| engine.list_distinct_districts(&name)).await
}

/// Handler for server health check
pub async fn handle_health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        records: state.engine.total(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fallback for unknown routes
pub async fn handle_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

// Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalResponse {
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    /// Records loaded at startup
    pub records: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
