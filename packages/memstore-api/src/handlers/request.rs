//! Request parsing utilities shared by the endpoint handlers.

use hyper::body::{Body, Bytes};
use hyper::Request;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use tokio::time;

use memstore_core::{FieldMap, Item, KeyedCollectionStore};

use crate::error::ApiError;

/// Parsed query string of a list endpoint: an optional `limit` plus
/// equality filters from the remaining `key=value` pairs.
#[derive(Debug, Default)]
pub struct ListQuery {
    /// Truncate the result to at most this many items
    pub limit: Option<usize>,
    /// Field equality filters, matched case-insensitively
    pub filters: FieldMap,
}

/// Parses the query string of a list endpoint. Values are
/// percent-decoded; pairs without `=` are skipped.
pub fn parse_list_query(query_str: Option<&str>) -> Result<ListQuery, ApiError> {
    let mut query = ListQuery::default();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            let Some((key, encoded_value)) = pair.split_once('=') else {
                continue;
            };
            let decoded_value = percent_decode_str(encoded_value).decode_utf8_lossy();

            if key == "limit" {
                query.limit = Some(decoded_value.parse().map_err(|e| {
                    ApiError::BadRequest(format!("Invalid limit value '{}': {}", decoded_value, e))
                })?);
            } else {
                query
                    .filters
                    .insert(key.to_string(), Value::String(decoded_value.into_owned()));
            }
        }
    }

    Ok(query)
}

/// Resolves a list request against the store: plain `list` when no
/// filters are present, `search` otherwise, with `limit` applied on top.
pub fn query_collection(
    store: &KeyedCollectionStore,
    collection: &str,
    query: &ListQuery,
) -> Vec<Item> {
    if query.filters.is_empty() {
        store.list(collection, query.limit)
    } else {
        let mut items = store.search(collection, &query.filters);
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        items
    }
}

/// Parses a write-request body. Anything that is not a JSON object is
/// rejected, including valid JSON of another shape.
pub fn parse_object(body: &[u8]) -> Result<FieldMap, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(ApiError::InvalidJson),
    }
}

/// Reads the full request body, bounded by the configured timeout.
pub async fn read_body_with_timeout<B>(req: Request<B>, timeout_ms: u64) -> Result<Bytes, ApiError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    use http_body_util::BodyExt;

    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let collected = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| ApiError::Timeout)?
        .map_err(|e| ApiError::Internal(format!("Failed to read request body: {}", e)))?;
    Ok(collected.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_list_query_handles_all_shapes() {
        // Empty query
        let query = parse_list_query(None).unwrap();
        assert!(query.limit.is_none());
        assert!(query.filters.is_empty());

        // Limit only
        let query = parse_list_query(Some("limit=10")).unwrap();
        assert_eq!(query.limit, Some(10));
        assert!(query.filters.is_empty());

        // Filters only
        let query = parse_list_query(Some("name=John%20Doe&color=red")).unwrap();
        assert!(query.limit.is_none());
        assert_eq!(query.filters.get("name"), Some(&json!("John Doe")));
        assert_eq!(query.filters.get("color"), Some(&json!("red")));

        // Mixed, with a dangling pair
        let query = parse_list_query(Some("limit=5&name=widget&junk")).unwrap();
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.filters.len(), 1);

        // Invalid limit
        assert!(parse_list_query(Some("limit=abc")).is_err());
    }

    #[test]
    fn parse_object_rejects_non_objects() {
        assert!(parse_object(br#"{"name": "widget"}"#).is_ok());
        assert!(parse_object(b"not json").is_err());
        assert!(parse_object(br#"[1, 2, 3]"#).is_err());
        assert!(parse_object(br#""just a string""#).is_err());
        assert!(parse_object(b"").is_err());
    }

    #[test]
    fn query_collection_applies_filters_and_limit() {
        let store = KeyedCollectionStore::new();
        for i in 0..4 {
            let mut fields = FieldMap::new();
            fields.insert("parity".to_string(), json!(if i % 2 == 0 { "even" } else { "odd" }));
            store.create("items", fields);
        }

        let unfiltered = parse_list_query(Some("limit=3")).unwrap();
        assert_eq!(query_collection(&store, "items", &unfiltered).len(), 3);

        let filtered = parse_list_query(Some("parity=EVEN&limit=1")).unwrap();
        let items = query_collection(&store, "items", &filtered);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].fields.get("parity"), Some(&json!("even")));
    }
}
