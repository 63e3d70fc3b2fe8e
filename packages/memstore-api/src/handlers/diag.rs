//! Diagnostic endpoints: service banner, health, stats, echo.

use std::collections::BTreeMap;

use chrono::Utc;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::router::AppState;

use super::response::json_response;

const SERVICE_NAME: &str = "memstore-server";

/// `GET /`: service banner with the endpoint map.
pub fn home() -> Result<Response<Bytes>, ApiError> {
    json_response(
        200,
        &json!({
            "service": SERVICE_NAME,
            "status": "running",
            "endpoints": {
                "root": "/",
                "health": "/health",
                "users": "/api/users",
                "items": "/api/items",
                "stats": "/api/stats",
                "echo": "/api/echo",
            },
        }),
    )
}

/// `GET /health`.
pub fn health() -> Result<Response<Bytes>, ApiError> {
    json_response(
        200,
        &json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "timestamp": Utc::now(),
        }),
    )
}

/// `GET /api/stats`: process diagnostics and per-collection counts.
pub fn stats(state: &AppState) -> Result<Response<Bytes>, ApiError> {
    let collections: BTreeMap<String, usize> = state
        .store
        .collection_names()
        .into_iter()
        .map(|name| {
            let count = state.store.count(&name);
            (name, count)
        })
        .collect();

    json_response(
        200,
        &json!({
            "service": SERVICE_NAME,
            "pid": std::process::id(),
            "uptime_seconds": (Utc::now() - state.started_at).num_seconds(),
            "collections": collections,
            "timestamp": Utc::now(),
        }),
    )
}

/// `GET /api/echo`: usage hint for the POST form.
pub fn echo_usage() -> Result<Response<Bytes>, ApiError> {
    json_response(
        200,
        &json!({
            "message": "Echo endpoint - send a POST request with a JSON body",
            "method": "GET",
            "timestamp": Utc::now(),
        }),
    )
}

/// `POST /api/echo`: returns the parsed JSON body. Any JSON shape is
/// accepted here, not just objects.
pub fn echo(body: &[u8]) -> Result<Response<Bytes>, ApiError> {
    let received: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)?;
    json_response(
        200,
        &json!({
            "message": "Echo response",
            "received": received,
            "method": "POST",
            "timestamp": Utc::now(),
        }),
    )
}
