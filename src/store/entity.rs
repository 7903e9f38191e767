use std::marker::PhantomData;
use std::sync::Arc;

use super::DocumentStore;
use crate::error::AppResult;
use crate::models::{Record, RecordPatch};

/// Typed CRUD surface over one collection of the document store. One
/// instance exists per record kind; all instances share the same store.
pub struct EntityStore<T: Record> {
    documents: Arc<dyn DocumentStore>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            _kind: PhantomData,
        }
    }
}

impl<T: Record> EntityStore<T> {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents,
            _kind: PhantomData,
        }
    }

    /// The underlying document store, for collaborators that need raw
    /// access (the id allocator checks candidate ids against it).
    pub fn documents(&self) -> &Arc<dyn DocumentStore> {
        &self.documents
    }

    pub async fn list_all(&self) -> AppResult<Vec<T>> {
        let docs = self.documents.scan(T::COLLECTION).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// `None` is the normal outcome for an unknown id, not a fault.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        match self.documents.find(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Persist a record that already carries its id. Uniqueness of the id is
    /// the allocator's responsibility, not the store's.
    pub async fn insert(&self, record: T) -> AppResult<T> {
        let doc = serde_json::to_value(&record)?;
        self.documents.insert(T::COLLECTION, record.id(), doc).await?;
        Ok(record)
    }

    /// Shallow partial merge: only fields present in the patch change.
    pub async fn update_partial(&self, id: &str, patch: T::Patch) -> AppResult<Option<T>> {
        let Some(mut record) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut record);
        let doc = serde_json::to_value(&record)?;
        self.documents.replace(T::COLLECTION, id, doc).await?;
        Ok(Some(record))
    }

    /// Remove by id with no cascade; dependents keep their foreign keys.
    pub async fn delete_by_id(&self, id: &str) -> AppResult<Option<T>> {
        match self.documents.remove(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }
}
