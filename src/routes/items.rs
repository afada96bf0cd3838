//! Item CRUD handlers.
//!
//! Each handler validates its path and body first, so a malformed
//! identifier or body is answered with 400 without touching the store.

use crate::error::{ServerError, ServerResult};
use crate::gateway::StoreError;
use crate::id::ItemId;
use crate::model::{Item, NewItem};
use crate::state::ServerState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const ITEM_DELETED: &str = "Item deleted successfully";

/// Confirmation body for update and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Decode the `{id}` path segment, rejecting anything that is not an
/// identifier (including segments that are not valid UTF-8).
fn parse_path_id(path: Result<Path<String>, PathRejection>) -> ServerResult<ItemId> {
    let Path(id) = path?;
    Ok(ItemId::parse(&id)?)
}

/// List every item in the collection
pub async fn list_items(State(state): State<Arc<ServerState>>) -> ServerResult<Json<Vec<Item>>> {
    let items = state.gateway.list_all().await?;
    Ok(Json(items))
}

/// Fetch one item.
///
/// Every lookup failure is reported as 404, including store outages.
pub async fn get_item(
    State(state): State<Arc<ServerState>>,
    path: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<Item>> {
    let id = parse_path_id(path)?;

    match state.gateway.find_by_id(id).await {
        Ok(item) => Ok(Json(item)),
        Err(StoreError::NotFound) => Err(ServerError::item_not_found()),
        Err(err) => {
            tracing::debug!(%id, error = %err, "lookup failed, reporting not found");
            Err(ServerError::item_not_found())
        }
    }
}

/// Create an item; the store assigns its identifier
pub async fn create_item(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ServerResult<Json<Item>> {
    let Json(item) = payload?;
    let created = state.gateway.insert(item).await?;

    if let Some(id) = &created.id {
        tracing::info!(%id, "Item created");
    }
    Ok(Json(created))
}

/// Replace the fields of an item.
///
/// Succeeds even if no item has this identifier.
pub async fn update_item(
    State(state): State<Arc<ServerState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    // Body errors win over identifier errors when both are bad.
    let Json(item) = payload?;
    let id = parse_path_id(path)?;

    state.gateway.replace_by_id(id, &item).await?;
    Ok(MessageResponse::new(ITEM_UPDATED))
}

/// Delete an item. Succeeds even if no item has this identifier.
pub async fn delete_item(
    State(state): State<Arc<ServerState>>,
    path: Result<Path<String>, PathRejection>,
) -> ServerResult<impl IntoResponse> {
    let id = parse_path_id(path)?;

    state.gateway.delete_by_id(id).await?;
    Ok(MessageResponse::new(ITEM_DELETED))
}
