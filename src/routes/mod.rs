//! API route handlers
//!
//! - `items`: the item collection (list, get, create, update, delete)
//! - `health`: liveness and readiness probes

pub mod health;
pub mod items;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Item Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /items",
            "GET /items/{id}",
            "POST /items",
            "PUT /items/{id}",
            "DELETE /items/{id}",
            "GET /health",
            "GET /ready"
        ]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound("Not found".to_string())
}

/// 405 handler for known paths hit with an unsupported method
pub async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}
