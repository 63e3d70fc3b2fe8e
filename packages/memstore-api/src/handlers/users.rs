//! User endpoint handlers.

use hyper::body::Bytes;
use hyper::Response;

use crate::error::ApiError;
use crate::router::AppState;

use super::request::{parse_list_query, parse_object, query_collection};
use super::response::json_response;

/// `GET /api/users`: lists users as a plain JSON array. `limit=N`
/// truncates; other query parameters become search filters.
pub fn list_users(query: Option<&str>, state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let query = parse_list_query(query)?;
    let users = query_collection(&state.store, "users", &query);
    json_response(200, &users)
}

/// `POST /api/users`: creates a user from the JSON object body and
/// returns the stored record.
pub fn create_user(body: &[u8], state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let fields = parse_object(body)?;
    let id = state.store.create("users", fields);
    let user = state
        .store
        .get("users", &id)
        .ok_or_else(|| ApiError::Internal(format!("user {} vanished after create", id)))?;
    json_response(201, &user)
}
