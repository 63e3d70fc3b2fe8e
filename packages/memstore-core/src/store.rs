//! Store container: named collections of items behind one store-wide lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::item::{FieldMap, Item};

/// A named bucket of items, keyed by item id.
type Collection = HashMap<String, Item>;

/// Process-wide associative store: collection name to item id to item.
///
/// One reader/writer lock guards the whole two-level map, so every
/// operation observes a consistent snapshot and multi-step mutations
/// (generate-id-then-insert) never interleave. Collections are created
/// lazily on first write; reads of absent collections yield empty results
/// rather than errors.
#[derive(Debug, Default)]
pub struct KeyedCollectionStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl KeyedCollectionStore {
    /// Creates an empty store with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the store the service starts with: three seed users and an
    /// empty `items` collection.
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        for (name, email) in [
            ("John Doe", "john@example.com"),
            ("Jane Smith", "jane@example.com"),
            ("Bob Johnson", "bob@example.com"),
        ] {
            let mut fields = Map::new();
            fields.insert("name".to_string(), json!(name));
            fields.insert("email".to_string(), json!(email));
            store.create("users", fields);
        }
        store
            .collections
            .write()
            .entry("items".to_string())
            .or_default();
        tracing::info!("store seeded: 3 users, empty items collection");
        store
    }

    /// Inserts a new item into the collection and returns its id.
    ///
    /// The id is a random 128-bit token; generation and insertion happen
    /// under one write guard. System fields win over caller fields on key
    /// collision.
    pub fn create(&self, collection: &str, fields: FieldMap) -> String {
        let mut collections = self.collections.write();
        let items = collections.entry(collection.to_string()).or_default();
        let id = Uuid::new_v4().to_string();
        items.insert(id.clone(), Item::new(id.clone(), fields));
        tracing::debug!(collection, id = %id, "item created");
        id
    }

    /// Returns the item if present.
    pub fn get(&self, collection: &str, id: &str) -> Option<Item> {
        self.collections.read().get(collection)?.get(id).cloned()
    }

    /// Returns the items of a collection, truncated to the first `limit`
    /// in iteration order if given. Order is implementation-defined.
    pub fn list(&self, collection: &str, limit: Option<usize>) -> Vec<Item> {
        let collections = self.collections.read();
        let Some(items) = collections.get(collection) else {
            return Vec::new();
        };
        let values = items.values().cloned();
        match limit {
            Some(n) => values.take(n).collect(),
            None => values.collect(),
        }
    }

    /// Merges `fields` into an existing item and refreshes `updated_at`.
    /// Returns whether the item existed; absent items are left untouched.
    /// `id` and `created_at` are immutable and survive the merge.
    pub fn update(&self, collection: &str, id: &str, fields: FieldMap) -> bool {
        let mut collections = self.collections.write();
        match collections.get_mut(collection).and_then(|c| c.get_mut(id)) {
            Some(item) => {
                item.merge(fields);
                tracing::debug!(collection, id, "item updated");
                true
            }
            None => false,
        }
    }

    /// Removes the item. Returns whether it existed.
    pub fn delete(&self, collection: &str, id: &str) -> bool {
        let mut collections = self.collections.write();
        let removed = collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .is_some();
        if removed {
            tracing::debug!(collection, id, "item deleted");
        }
        removed
    }

    /// Number of items in the collection, 0 if the collection is absent.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Names of all collections currently present.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    /// Returns items whose every filter field matches under
    /// case-insensitive string comparison. Non-string values are compared
    /// via their canonical JSON rendering. An empty filter map matches
    /// everything; a filter on a missing field never matches.
    pub fn search(&self, collection: &str, filters: &FieldMap) -> Vec<Item> {
        let collections = self.collections.read();
        let Some(items) = collections.get(collection) else {
            return Vec::new();
        };
        items
            .values()
            .filter(|item| matches_filters(item, filters))
            .cloned()
            .collect()
    }
}

fn matches_filters(item: &Item, filters: &FieldMap) -> bool {
    filters.iter().all(|(key, expected)| {
        item.field(key)
            .is_some_and(|actual| render(&actual).to_lowercase() == render(expected).to_lowercase())
    })
}

/// String rendering used for filter comparison: strings compare by their
/// contents, everything else by its JSON literal.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
