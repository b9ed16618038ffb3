//! API module for the Edudir serve crate

use crate::handlers::{
    handle_all_states, handle_by_district, handle_by_state, handle_districts,
    handle_health_check, handle_not_found, handle_search, handle_total, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// API routes configuration
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health_check))
        .route("/colleges/total", get(handle_total))
        .route("/colleges/search", post(handle_search))
        .route("/colleges/state/:state", get(handle_by_state))
        .route("/colleges/district/:district", get(handle_by_district))
        .route("/allstates", get(handle_all_states))
        .route("/districts/:state", get(handle_districts))
}

/// Routes bound to their state, with the JSON 404 fallback
pub fn create_router(state: AppState) -> Router {
    create_routes().fallback(handle_not_found).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{create_shared_cache, ResponseCacheConfig};
    use crate::error::ValidationErrorResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use edudir_core::{Dataset, QueryEngine, Record, Schema};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn test_server() -> TestServer {
        let records = vec![
            Record::from_pairs([
                ("name", "ABC College (Id:12)"),
                ("state", "X"),
                ("district", "D1"),
            ]),
            Record::from_pairs([("name", "XYZ Inst"), ("state", "X"), ("district", "D2")]),
            Record::from_pairs([("name", "ABC Tech"), ("state", "Y"), ("district", "D3")]),
        ];
        let engine = QueryEngine::new(Arc::new(Dataset::new(records, Schema::default())));
        let cache = create_shared_cache(ResponseCacheConfig::default());
        TestServer::new(create_router(AppState::new(engine, Some(cache)))).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["records"], 3);
    }

    #[tokio::test]
    async fn test_total() {
        let server = test_server();

        let response = server.get("/colleges/total").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({"total": 3}));
    }

    #[tokio::test]
    async fn test_search() {
        let server = test_server();

        let response = server
            .post("/colleges/search")
            .json(&json!({"keyword": "abc"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["total"], 2);
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["data"][0]["name"], "ABC College");
        assert_eq!(body["data"][1]["name"], "ABC Tech");
    }

    #[tokio::test]
    async fn test_search_requires_keyword() {
        let server = test_server();

        let response = server
            .post("/colleges/search")
            .json(&json!({"page": 1}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: ValidationErrorResponse = response.json();
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field, "keyword");
    }

    #[tokio::test]
    async fn test_search_rejects_non_json_body() {
        let server = test_server();

        let response = server.post("/colleges/search").text("abc").await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: ValidationErrorResponse = response.json();
        assert_eq!(body.errors[0].field, "body");
    }

    #[tokio::test]
    async fn test_by_state_and_district() {
        let server = test_server();

        let response = server.get("/colleges/state/y").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["name"], "ABC Tech");

        let response = server.get("/colleges/district/d2").await;
        let body: Value = response.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["state"], "X");
    }

    #[tokio::test]
    async fn test_query_validation() {
        let server = test_server();

        let response = server
            .get("/colleges/state/X")
            .add_query_param("page", "0")
            .add_query_param("limit", "101")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body: ValidationErrorResponse = response.json();
        let fields: Vec<_> = body.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["page", "limit"]);
    }

    #[tokio::test]
    async fn test_distinct_listings() {
        let server = test_server();

        let states: Vec<String> = server.get("/allstates").await.json();
        assert_eq!(states, vec!["X", "Y"]);

        let districts: Vec<String> = server.get("/districts/x").await.json();
        assert_eq!(districts, vec!["D1", "D2"]);

        let none: Vec<String> = server.get("/districts/nowhere").await.json();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = test_server();

        let response = server.get("/colleges/unknown/route").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({"error": "Not found"}));
    }
}
