//! Item endpoint handlers.

use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use serde_json::json;

use memstore_core::Item;

use crate::error::ApiError;
use crate::router::AppState;

use super::request::{parse_list_query, parse_object, query_collection};
use super::response::json_response;

/// Response envelope for item listings.
#[derive(Debug, Serialize)]
struct ItemsEnvelope {
    items: Vec<Item>,
    count: usize,
}

/// `GET /api/items`: lists items in an `{items, count}` envelope.
/// `limit=N` truncates; other query parameters become search filters.
pub fn list_items(query: Option<&str>, state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let query = parse_list_query(query)?;
    let items = query_collection(&state.store, "items", &query);
    json_response(
        200,
        &ItemsEnvelope {
            count: items.len(),
            items,
        },
    )
}

/// `POST /api/items`: creates an item from the JSON object body and
/// returns the stored record.
pub fn create_item(body: &[u8], state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let fields = parse_object(body)?;
    let id = state.store.create("items", fields);
    let item = state
        .store
        .get("items", &id)
        .ok_or_else(|| ApiError::Internal(format!("item {} vanished after create", id)))?;
    json_response(201, &item)
}

/// `GET /api/items/{id}`.
pub fn get_item(id: &str, state: &AppState) -> Result<Response<Bytes>, ApiError> {
    match state.store.get("items", id) {
        Some(item) => json_response(200, &item),
        None => Err(ApiError::NotFound("Item not found".to_string())),
    }
}

/// `PUT /api/items/{id}`: merges the JSON object body into the item and
/// returns the updated record.
pub fn update_item(id: &str, body: &[u8], state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let fields = parse_object(body)?;
    if !state.store.update("items", id, fields) {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }
    let item = state
        .store
        .get("items", id)
        .ok_or_else(|| ApiError::Internal(format!("item {} vanished after update", id)))?;
    json_response(200, &item)
}

/// `DELETE /api/items/{id}`.
pub fn delete_item(id: &str, state: &AppState) -> Result<Response<Bytes>, ApiError> {
    if state.store.delete("items", id) {
        json_response(200, &json!({ "message": "Item deleted" }))
    } else {
        Err(ApiError::NotFound("Item not found".to_string()))
    }
}
