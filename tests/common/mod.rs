//! Shared helpers for the HTTP integration tests.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`;
//! no socket is bound and no MongoDB is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server::gateway::{InMemoryStore, StoreResult};
use server::{build_router, Item, ItemId, ItemStore, NewItem, ServerConfig, ServerState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// A well-formed identifier that no test ever inserts.
pub const UNKNOWN_ID: &str = "65a1f0c2b3d4e5f601234567";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        backend: "memory".to_string(),
        ..ServerConfig::default()
    }
}

pub fn app_with_store(store: Arc<dyn ItemStore>) -> Router {
    let state = Arc::new(ServerState::new(test_config(), store));
    build_router(state)
}

pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryStore::new()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Store whose every operation fails as if the server were unreachable.
pub struct UnreachableStore;

#[async_trait]
impl ItemStore for UnreachableStore {
    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        Err(server::StoreError::unavailable("connection refused"))
    }
    async fn find_by_id(&self, _id: ItemId) -> StoreResult<Item> {
        Err(server::StoreError::unavailable("connection refused"))
    }
    async fn insert(&self, _item: &NewItem) -> StoreResult<ItemId> {
        Err(server::StoreError::unavailable("connection refused"))
    }
    async fn replace_by_id(&self, _id: ItemId, _item: &NewItem) -> StoreResult<()> {
        Err(server::StoreError::unavailable("connection refused"))
    }
    async fn delete_by_id(&self, _id: ItemId) -> StoreResult<()> {
        Err(server::StoreError::unavailable("connection refused"))
    }
    async fn ping(&self) -> StoreResult<()> {
        Err(server::StoreError::unavailable("connection refused"))
    }
}

/// In-memory store that counts how many calls reach it.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemStore for CountingStore {
    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        self.hit();
        self.inner.list_all().await
    }
    async fn find_by_id(&self, id: ItemId) -> StoreResult<Item> {
        self.hit();
        self.inner.find_by_id(id).await
    }
    async fn insert(&self, item: &NewItem) -> StoreResult<ItemId> {
        self.hit();
        self.inner.insert(item).await
    }
    async fn replace_by_id(&self, id: ItemId, item: &NewItem) -> StoreResult<()> {
        self.hit();
        self.inner.replace_by_id(id, item).await
    }
    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        self.hit();
        self.inner.delete_by_id(id).await
    }
}
