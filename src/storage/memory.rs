//! In-Memory Storage Module
//!
//! Reference storage backend: a bounded, uniquely-keyed collection held in
//! process memory behind a tokio RwLock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::Record;
use crate::storage::order::InsertionOrder;
use crate::storage::{Storage, StorageError, UpsertOutcome};

// == Collection Config ==
/// Capacity configuration fixed at setup time.
#[derive(Debug, Clone)]
struct CollectionConfig {
    #[allow(dead_code)]
    name: String,
    max_entries: usize,
    /// Advisory byte budget; this backend evicts by entry count only.
    #[allow(dead_code)]
    byte_capacity: usize,
}

// == Inner State ==
#[derive(Debug, Default)]
struct Inner {
    config: Option<CollectionConfig>,
    entries: HashMap<String, Record>,
    order: InsertionOrder,
}

// == Memory Storage ==
/// Bounded in-memory collection with a unique key index.
///
/// HashMap storage paired with an [`InsertionOrder`] tracker; eviction pops
/// the oldest-inserted key when a new key would exceed capacity. All
/// mutations happen under a single write lock, which makes per-key
/// insert-or-replace and delete atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    // == Constructor ==
    /// Creates a new, unconfigured storage backend.
    ///
    /// `ensure_bounded_unique_collection` must be called before any other
    /// operation.
    pub fn new() -> Self {
        Self::default()
    }

    fn require_config(inner: &Inner) -> Result<&CollectionConfig, StorageError> {
        inner
            .config
            .as_ref()
            .ok_or_else(|| StorageError::NotInitialized("cache".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ensure_bounded_unique_collection(
        &self,
        name: &str,
        max_entries: usize,
        byte_capacity: usize,
    ) -> Result<(), StorageError> {
        if max_entries == 0 {
            return Err(StorageError::SetupFailed(
                "max_entries must be positive".to_string(),
            ));
        }

        let mut inner = self.inner.write().await;

        // Idempotent: an existing collection is left untouched
        if inner.config.is_some() {
            debug!(collection = name, "collection already exists, setup is a no-op");
            return Ok(());
        }

        inner.config = Some(CollectionConfig {
            name: name.to_string(),
            max_entries,
            byte_capacity,
        });
        debug!(
            collection = name,
            max_entries, byte_capacity, "bounded collection created"
        );
        Ok(())
    }

    async fn insert_or_replace(&self, record: Record) -> Result<UpsertOutcome, StorageError> {
        let mut inner = self.inner.write().await;
        let max_entries = Self::require_config(&inner)?.max_entries;

        if inner.entries.contains_key(&record.key) {
            // Replace in place: count and insertion position are unchanged
            let key = record.key.clone();
            inner.entries.insert(key, record);
            return Ok(UpsertOutcome::Replaced);
        }

        // New key: evict oldest-inserted records until there is room
        while inner.entries.len() >= max_entries {
            match inner.order.evict_oldest() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                    debug!(key = %oldest, "evicted oldest record to admit new key");
                }
                None => {
                    // Tracker and map out of step; should be unreachable
                    return Err(StorageError::Unavailable(
                        "eviction tracker empty while collection full".to_string(),
                    ));
                }
            }
        }

        inner.order.record(&record.key);
        let key = record.key.clone();
        inner.entries.insert(key, record);
        Ok(UpsertOutcome::Created)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Record>, StorageError> {
        let inner = self.inner.read().await;
        Self::require_config(&inner)?;
        Ok(inner.entries.get(key).cloned())
    }

    async fn find_all_ordered(&self) -> Result<Vec<Record>, StorageError> {
        let inner = self.inner.read().await;
        Self::require_config(&inner)?;

        // Snapshot in insertion order; concurrent writes after the lock is
        // released are not reflected
        Ok(inner
            .order
            .snapshot()
            .iter()
            .filter_map(|key| inner.entries.get(key).cloned())
            .collect())
    }

    async fn delete_by_key(&self, key: &str) -> Result<bool, StorageError> {
        let mut inner = self.inner.write().await;
        Self::require_config(&inner)?;

        let removed = inner.entries.remove(key).is_some();
        if removed {
            inner.order.remove(key);
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        Self::require_config(&inner)?;

        inner.entries.clear();
        inner.order.clear();
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn ready_storage(max_entries: usize) -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage
            .ensure_bounded_unique_collection("cache", max_entries, max_entries * 256)
            .await
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_setup_is_idempotent() {
        let storage = ready_storage(10).await;

        // Second call must be a no-op, not an error
        storage
            .ensure_bounded_unique_collection("cache", 10, 2560)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_setup_rejects_zero_capacity() {
        let storage = MemoryStorage::new();

        let result = storage
            .ensure_bounded_unique_collection("cache", 0, 0)
            .await;
        assert!(matches!(result, Err(StorageError::SetupFailed(_))));
    }

    #[tokio::test]
    async fn test_operations_require_setup() {
        let storage = MemoryStorage::new();

        let result = storage.find_by_key("key1").await;
        assert!(matches!(result, Err(StorageError::NotInitialized(_))));
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let storage = ready_storage(10).await;

        let outcome = storage
            .insert_or_replace(Record::new("key1", json!("value1")))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);

        let found = storage.find_by_key("key1").await.unwrap().unwrap();
        assert_eq!(found.value, json!("value1"));
    }

    #[tokio::test]
    async fn test_replace_keeps_count_and_position() {
        let storage = ready_storage(10).await;

        storage
            .insert_or_replace(Record::new("key1", json!("v1")))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("key2", json!("v2")))
            .await
            .unwrap();

        let outcome = storage
            .insert_or_replace(Record::new("key1", json!("v1b")))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        let all = storage.find_all_ordered().await.unwrap();
        let keys: Vec<&str> = all.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["key1", "key2"]);
        assert_eq!(all[0].value, json!("v1b"));
    }

    #[tokio::test]
    async fn test_fifo_eviction_on_full() {
        let storage = ready_storage(2).await;

        storage
            .insert_or_replace(Record::new("a", json!(1)))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("b", json!(2)))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("c", json!(3)))
            .await
            .unwrap();

        // "a" was oldest and must be gone
        assert!(storage.find_by_key("a").await.unwrap().is_none());
        let all = storage.find_all_ordered().await.unwrap();
        let keys: Vec<&str> = all.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_delete_by_key() {
        let storage = ready_storage(10).await;

        storage
            .insert_or_replace(Record::new("key1", json!("v")))
            .await
            .unwrap();

        assert!(storage.delete_by_key("key1").await.unwrap());
        assert!(!storage.delete_by_key("key1").await.unwrap());
        assert!(storage.find_by_key("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_all_preserves_capacity() {
        let storage = ready_storage(2).await;

        storage
            .insert_or_replace(Record::new("a", json!(1)))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("b", json!(2)))
            .await
            .unwrap();

        storage.delete_all().await.unwrap();
        assert!(storage.find_all_ordered().await.unwrap().is_empty());

        // Capacity config survives: filling past max still evicts
        storage
            .insert_or_replace(Record::new("c", json!(3)))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("d", json!(4)))
            .await
            .unwrap();
        storage
            .insert_or_replace(Record::new("e", json!(5)))
            .await
            .unwrap();

        let all = storage.find_all_ordered().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(storage.find_by_key("c").await.unwrap().is_none());
    }
}
