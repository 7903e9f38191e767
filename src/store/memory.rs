use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::AppResult;

/// In-process document store. Collections are materialized on first write,
/// and each operation takes the lock once, so single-record atomicity holds.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> AppResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection) {
            Some(docs) if docs.contains_key(id) => {
                docs.insert(id.to_string(), doc);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id)))
    }
}
