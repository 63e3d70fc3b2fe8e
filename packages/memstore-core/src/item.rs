//! Item record model: typed system fields plus an open field map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied fields of an item, keyed by field name.
pub type FieldMap = Map<String, Value>;

/// Field names owned by the store. Caller-supplied values under these keys
/// never reach the open field map.
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// A single stored record, uniquely identified within its collection.
///
/// The system fields are typed; everything else lives in the flattened
/// `fields` map, so a serialized item reads as one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned at creation. Immutable.
    pub id: String,
    /// Creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
    /// Caller-supplied fields.
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Item {
    /// Builds a fresh item from caller fields with both timestamps set to
    /// now. System keys in `fields` are discarded so they cannot shadow
    /// the typed fields.
    pub(crate) fn new(id: String, fields: FieldMap) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            fields: strip_system_keys(fields),
        }
    }

    /// Merges caller fields into the item, overwriting overlapping keys,
    /// and refreshes `updated_at`. `id` and `created_at` stay untouched.
    pub(crate) fn merge(&mut self, fields: FieldMap) {
        for (key, value) in strip_system_keys(fields) {
            self.fields.insert(key, value);
        }
        self.updated_at = Utc::now();
    }

    /// Looks up a field by name, system fields included.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "created_at" => Some(Value::String(self.created_at.to_rfc3339())),
            "updated_at" => Some(Value::String(self.updated_at.to_rfc3339())),
            _ => self.fields.get(name).cloned(),
        }
    }
}

fn strip_system_keys(mut fields: FieldMap) -> FieldMap {
    for key in SYSTEM_FIELDS {
        fields.remove(key);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_map(pairs: &[(&str, Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn new_item_strips_system_keys_from_fields() {
        let fields = field_map(&[
            ("name", json!("widget")),
            ("id", json!("spoofed")),
            ("created_at", json!("1970-01-01T00:00:00Z")),
        ]);
        let item = Item::new("real-id".to_string(), fields);

        assert_eq!(item.id, "real-id");
        assert_eq!(item.fields.get("name"), Some(&json!("widget")));
        assert!(!item.fields.contains_key("id"));
        assert!(!item.fields.contains_key("created_at"));
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn merge_preserves_id_and_created_at() {
        let mut item = Item::new("abc".to_string(), field_map(&[("name", json!("old"))]));
        let created_at = item.created_at;

        item.merge(field_map(&[
            ("name", json!("new")),
            ("extra", json!(42)),
            ("id", json!("clobbered")),
            ("created_at", json!("clobbered")),
        ]));

        assert_eq!(item.id, "abc");
        assert_eq!(item.created_at, created_at);
        assert!(item.updated_at >= created_at);
        assert_eq!(item.fields.get("name"), Some(&json!("new")));
        assert_eq!(item.fields.get("extra"), Some(&json!(42)));
    }

    #[test]
    fn serializes_as_flat_object() {
        let item = Item::new("xyz".to_string(), field_map(&[("name", json!("widget"))]));
        let value = serde_json::to_value(&item).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.get("id"), Some(&json!("xyz")));
        assert_eq!(obj.get("name"), Some(&json!("widget")));
        assert!(obj.contains_key("created_at"));
        assert!(obj.contains_key("updated_at"));
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn field_lookup_covers_system_and_open_fields() {
        let item = Item::new("abc".to_string(), field_map(&[("name", json!("widget"))]));

        assert_eq!(item.field("id"), Some(json!("abc")));
        assert_eq!(item.field("name"), Some(json!("widget")));
        assert!(item.field("created_at").is_some());
        assert_eq!(item.field("missing"), None);
    }
}
