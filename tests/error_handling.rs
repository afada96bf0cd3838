//! Status-code mapping for invalid input and store failures.

mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{app, app_with_store, send, send_request, CountingStore, UnreachableStore, UNKNOWN_ID};
use serde_json::json;
use server::gateway::StoreResult;
use server::{Item, ItemId, ItemStore, NewItem, StoreError};
use std::sync::Arc;

#[tokio::test]
async fn malformed_ids_are_rejected_before_the_store() {
    let store = Arc::new(CountingStore::default());
    let app = app_with_store(store.clone());

    for bad in ["not-an-id", "1234", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
        let path = format!("/items/{bad}");

        let get = send(&app, Method::GET, &path, None).await;
        assert_eq!(get.status, StatusCode::BAD_REQUEST, "GET {bad}");
        assert_eq!(get.body, json!({"error": "Invalid ID format"}));

        let put = send(&app, Method::PUT, &path, Some(json!({"name": "x"}))).await;
        assert_eq!(put.status, StatusCode::BAD_REQUEST, "PUT {bad}");
        assert_eq!(put.body["error"], "Invalid ID format");

        let delete = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(delete.status, StatusCode::BAD_REQUEST, "DELETE {bad}");
        assert_eq!(delete.body["error"], "Invalid ID format");
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let store = Arc::new(CountingStore::default());
    let app = app_with_store(store.clone());

    let cases = [
        ("application/json", "{not json"),
        ("application/json", r#"{"name": 5}"#),
        ("application/json", "[1, 2]"),
        ("text/plain", r#"{"name": "pen"}"#),
    ];

    for (content_type, body) in cases {
        for (method, uri) in [
            (Method::POST, "/items".to_string()),
            (Method::PUT, format!("/items/{UNKNOWN_ID}")),
        ] {
            let request = Request::builder()
                .method(method.clone())
                .uri(&uri)
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap();
            let resp = send_request(&app, request).await;
            assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{method} {body}");
            assert!(resp.body["error"].is_string());
        }
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn store_outage_maps_per_operation() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let path = format!("/items/{UNKNOWN_ID}");

    let list = send(&app, Method::GET, "/items", None).await;
    assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list.body, json!({"error": "connection refused"}));

    // Lookup failures of any kind collapse into 404.
    let get = send(&app, Method::GET, &path, None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.body, json!({"error": "Item not found"}));

    let create = send(&app, Method::POST, "/items", Some(json!({"name": "pen"}))).await;
    assert_eq!(create.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(create.body["error"], "connection refused");

    let update = send(&app, Method::PUT, &path, Some(json!({"name": "pen"}))).await;
    assert_eq!(update.status, StatusCode::INTERNAL_SERVER_ERROR);

    let delete = send(&app, Method::DELETE, &path, None).await;
    assert_eq!(delete.status, StatusCode::INTERNAL_SERVER_ERROR);

    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
}

/// Accepts inserts but never reports the new identifier.
struct NoIdStore;

#[async_trait]
impl ItemStore for NoIdStore {
    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        Ok(Vec::new())
    }
    async fn find_by_id(&self, _id: ItemId) -> StoreResult<Item> {
        Err(StoreError::NotFound)
    }
    async fn insert(&self, _item: &NewItem) -> StoreResult<ItemId> {
        Err(StoreError::AssignmentFailure)
    }
    async fn replace_by_id(&self, _id: ItemId, _item: &NewItem) -> StoreResult<()> {
        Ok(())
    }
    async fn delete_by_id(&self, _id: ItemId) -> StoreResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn missing_assigned_id_is_internal_error() {
    let app = app_with_store(Arc::new(NoIdStore));
    let resp = send(&app, Method::POST, "/items", Some(json!({"name": "pen"}))).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({"error": "Error getting inserted ID"}));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let app = app();
    let resp = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn non_utf8_path_segment_is_invalid_identifier() {
    let store = Arc::new(CountingStore::default());
    let app = app_with_store(store.clone());
    let path = "/items/%FF%FE";

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"name": "x"}))),
        (Method::DELETE, None),
    ] {
        let resp = send(&app, method.clone(), path, body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(resp.body, json!({"error": "Invalid ID format"}), "{method}");
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn update_reports_body_error_before_identifier_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/items/not-an-id")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = send_request(&app, request).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let message = resp.body["error"].as_str().unwrap();
    assert_ne!(message, "Invalid ID format");
}

#[tokio::test]
async fn unsupported_method_is_json_method_not_allowed() {
    let app = app();

    let patch = send(
        &app,
        Method::PATCH,
        &format!("/items/{UNKNOWN_ID}"),
        Some(json!({"name": "x"})),
    )
    .await;
    assert_eq!(patch.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(patch.body, json!({"error": "Method not allowed"}));

    let delete_all = send(&app, Method::DELETE, "/items", None).await;
    assert_eq!(delete_all.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(delete_all.body["error"], "Method not allowed");
}
