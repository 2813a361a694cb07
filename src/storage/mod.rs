//! Storage Module
//!
//! Defines the storage collaborator contract the cache engine depends on,
//! plus the in-memory bounded backend shipped with the server.
//!
//! The engine only ever talks to [`Storage`]; the backing technology is
//! swappable without touching the engine.

mod memory;
mod order;

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::Record;
use crate::error::CacheError;

pub use memory::MemoryStorage;
pub use order::InsertionOrder;

// == Storage Error ==
/// Errors surfaced by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend unreachable or a round trip timed out
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Collection/index creation failed for a reason other than already-exists
    #[error("setup failed: {0}")]
    SetupFailed(String),

    /// Unique key index violated on write
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Operation attempted before the bounded collection was set up
    #[error("collection '{0}' not initialized")]
    NotInitialized(String),
}

impl From<StorageError> for CacheError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => CacheError::StorageUnavailable(msg),
            StorageError::SetupFailed(msg) => CacheError::SetupFailed(msg),
            StorageError::DuplicateKey(key) => CacheError::WriteConflict(key),
            StorageError::NotInitialized(name) => {
                CacheError::StorageUnavailable(format!("collection '{}' not initialized", name))
            }
        }
    }
}

// == Upsert Outcome ==
/// Result of an insert-or-replace: whether the key was new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A record with a new key was inserted
    Created,
    /// An existing record was replaced in place
    Replaced,
}

// == Storage Trait ==
/// Capability contract for the durable collection backing the cache.
///
/// Implementations must guarantee:
/// - `insert_or_replace` and `delete_by_key` are atomic per key (no
///   interleaving that duplicates a key or leaves it partially written)
/// - at most the configured number of records exist at any time, with the
///   oldest-inserted records evicted first to admit new keys
/// - `find_all_ordered` returns a point-in-time snapshot in insertion order
#[async_trait]
pub trait Storage: Send + Sync {
    /// Ensures a bounded collection with a unique key index exists.
    ///
    /// Idempotent: if the collection already exists the call is a no-op.
    /// `byte_capacity` is advisory sizing for backends that also budget by
    /// bytes; the entry-count bound `max_entries` is authoritative.
    async fn ensure_bounded_unique_collection(
        &self,
        name: &str,
        max_entries: usize,
        byte_capacity: usize,
    ) -> std::result::Result<(), StorageError>;

    /// Inserts a record or replaces the existing record with the same key.
    ///
    /// Inserting a new key into a full collection evicts the oldest
    /// record(s) first. Replacing never changes the record count.
    async fn insert_or_replace(
        &self,
        record: Record,
    ) -> std::result::Result<UpsertOutcome, StorageError>;

    /// Point lookup by key.
    async fn find_by_key(&self, key: &str)
        -> std::result::Result<Option<Record>, StorageError>;

    /// All records as a snapshot, oldest-inserted first.
    async fn find_all_ordered(&self) -> std::result::Result<Vec<Record>, StorageError>;

    /// Removes the record for `key`; returns whether one was removed.
    async fn delete_by_key(&self, key: &str) -> std::result::Result<bool, StorageError>;

    /// Removes all records, leaving capacity configuration intact.
    async fn delete_all(&self) -> std::result::Result<(), StorageError>;
}
