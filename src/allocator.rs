// Identifier allocation for new records. Both policies verify the issued id
// against the target collection before accepting it; handing out an id that
// already exists would make every by-id operation ambiguous.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::store::DocumentStore;

#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Issue an id guaranteed absent from `collection` at the time of issue.
    async fn allocate(&self, store: &dyn DocumentStore, collection: &str) -> AppResult<String>;
}

/// Per-collection monotonic counter, lazily seeded from the highest numeric
/// id already present so restarts never re-issue a live id.
#[derive(Default)]
pub struct SequenceAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    async fn seed(store: &dyn DocumentStore, collection: &str) -> AppResult<u64> {
        let docs = store.scan(collection).await?;
        let max = docs
            .iter()
            .filter_map(|doc| doc.get("id")?.as_str()?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }
}

#[async_trait]
impl IdAllocator for SequenceAllocator {
    async fn allocate(&self, store: &dyn DocumentStore, collection: &str) -> AppResult<String> {
        let mut counters = self.counters.lock().await;
        let next = match counters.get(collection) {
            Some(next) => *next,
            None => Self::seed(store, collection).await?,
        };

        // Non-numeric ids (seeded fixtures) can still occupy a slot; skip
        // over them rather than colliding.
        let mut candidate = next;
        loop {
            let id = candidate.to_string();
            if !store.exists(collection, &id).await? {
                counters.insert(collection.to_string(), candidate + 1);
                return Ok(id);
            }
            candidate += 1;
        }
    }
}

/// Random draw in 0..10000, stringified, matching the historical id shape —
/// but checked against the store and retried on collision instead of being
/// accepted blind.
pub struct RandomAllocator {
    max_attempts: u32,
}

impl RandomAllocator {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for RandomAllocator {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl IdAllocator for RandomAllocator {
    async fn allocate(&self, store: &dyn DocumentStore, collection: &str) -> AppResult<String> {
        for _ in 0..self.max_attempts {
            let candidate = {
                let mut rng = rand::rng();
                rand::Rng::random_range(&mut rng, 0..10_000u32)
            }
            .to_string();

            if !store.exists(collection, &candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::IdAllocation(format!(
            "exhausted {} attempts to find a free id in '{}'",
            self.max_attempts, collection
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::collections::HashSet;

    #[tokio::test]
    async fn sequence_starts_at_one_on_empty_collection() {
        let store = MemoryStore::new();
        let allocator = SequenceAllocator::new();
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "1");
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "2");
    }

    #[tokio::test]
    async fn sequence_seeds_past_existing_ids() {
        let store = MemoryStore::new();
        store.insert("games", "41", json!({"id": "41"})).await.unwrap();
        store.insert("games", "7", json!({"id": "7"})).await.unwrap();

        let allocator = SequenceAllocator::new();
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn sequence_counters_are_scoped_per_collection() {
        let store = MemoryStore::new();
        let allocator = SequenceAllocator::new();
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "1");
        assert_eq!(allocator.allocate(&store, "reviews").await.unwrap(), "1");
    }

    #[tokio::test]
    async fn sequence_skips_occupied_slots() {
        let store = MemoryStore::new();
        let allocator = SequenceAllocator::new();
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "1");
        store.insert("games", "2", json!({"id": "2"})).await.unwrap();
        assert_eq!(allocator.allocate(&store, "games").await.unwrap(), "3");
    }

    #[tokio::test]
    async fn random_never_issues_a_live_id() {
        let store = MemoryStore::new();
        let allocator = RandomAllocator::default();

        let mut issued = HashSet::new();
        for _ in 0..200 {
            let id = allocator.allocate(&store, "games").await.unwrap();
            assert!(issued.insert(id.clone()), "duplicate id {}", id);
            store
                .insert("games", &id, json!({"id": id}))
                .await
                .unwrap();
        }
    }
}
