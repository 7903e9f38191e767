// Document store boundary. The store provides per-record atomic operations
// over named collections of JSON documents; everything graph-shaped is
// layered on top of it.

pub mod entity;
pub mod memory;
pub mod sqlite;

pub use entity::EntityStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;

/// Persistence contract for flat JSON documents keyed by collection and id.
///
/// The store performs no uniqueness or referential checks; those sit with
/// the allocator and the mutation coordinator.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection. Order is not guaranteed.
    async fn scan(&self, collection: &str) -> AppResult<Vec<Value>>;

    /// Single document by id; `None` when no match.
    async fn find(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    /// Persist a new document under `id`.
    async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()>;

    /// Overwrite the document under `id`; `false` when no match existed.
    async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool>;

    /// Remove and return the document under `id`; `None` when no match.
    async fn remove(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    async fn exists(&self, collection: &str, id: &str) -> AppResult<bool> {
        Ok(self.find(collection, id).await?.is_some())
    }
}
