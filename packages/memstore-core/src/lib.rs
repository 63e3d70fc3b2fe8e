//! Core storage for the in-memory collection service.
//!
//! Provides a concurrency-safe associative store organized as a two-level
//! mapping: collection name to item id to item record.

pub mod item;
pub mod store;

pub use item::{FieldMap, Item};
pub use store::KeyedCollectionStore;
