//! API error taxonomy and its mapping onto HTTP responses.

use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the routing layer.
///
/// The store itself never fails; everything here is a property of the
/// request or of response construction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was not a JSON object
    #[error("Invalid JSON")]
    InvalidJson,

    /// Requested resource absent
    #[error("{0}")]
    NotFound(String),

    /// Method not supported on this route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Malformed query parameter
    #[error("{0}")]
    BadRequest(String),

    /// Body read exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Response construction or serialization failure
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidJson | ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Timeout => 408,
            ApiError::Internal(_) => 500,
        }
    }
}

/// Error body shape: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl From<ApiError> for Response<Bytes> {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal(detail) = &err {
            tracing::error!("internal error: {detail}");
        }
        let body = serde_json::to_vec(&ErrorBody {
            error: err.to_string(),
        })
        .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());

        Response::builder()
            .status(err.status())
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::new())
                    .expect("fallback error response")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::InvalidJson.status(), 400);
        assert_eq!(ApiError::BadRequest("x".into()).status(), 400);
        assert_eq!(ApiError::NotFound("x".into()).status(), 404);
        assert_eq!(ApiError::MethodNotAllowed.status(), 405);
        assert_eq!(ApiError::Timeout.status(), 408);
        assert_eq!(ApiError::Internal("x".into()).status(), 500);
    }

    #[test]
    fn invalid_json_body_matches_wire_contract() {
        let response: Response<Bytes> = ApiError::InvalidJson.into();
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Invalid JSON"}));
    }

    #[test]
    fn internal_error_hides_detail() {
        let response: Response<Bytes> = ApiError::Internal("secret detail".into()).into();
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }
}
