//! Response construction helpers.

use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::error::ApiError;

/// Serializes `data` and wraps it in a JSON response with the given
/// status.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Bytes>, ApiError> {
    let body = serde_json::to_vec(data)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {}", e)))?;
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(body))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
