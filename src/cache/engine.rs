//! Cache Engine Module
//!
//! The bounded cache engine: owns capacity and uniqueness policy, serves
//! lookups with miss-triggered generation, and enumerates keys in insertion
//! order. All persistence goes through the injected [`Storage`] collaborator.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::cache::{Record, ValueGenerator, MAX_KEY_LENGTH, PER_ENTRY_BYTES_ESTIMATE};
use crate::error::{CacheError, Result};
use crate::storage::{Storage, StorageError, UpsertOutcome};

// == Lookup Outcome ==
/// Tagged result of a `get`: whether the value was already stored or was
/// synthesized on this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The key was present; stored value returned unchanged
    Hit(Value),
    /// The key was absent; a value was generated and persisted
    Generated(Value),
}

impl Lookup {
    /// Unwraps the value, discarding the hit/generated tag.
    pub fn into_value(self) -> Value {
        match self {
            Lookup::Hit(value) | Lookup::Generated(value) => value,
        }
    }
}

// == Set Outcome ==
/// Whether a `set` created a new key or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Created,
    Updated,
}

// == Cache Engine ==
/// Bounded cache engine with FIFO eviction delegated to the storage layer.
///
/// Concurrency-safe: operations may be called from any number of request
/// tasks. Per-key atomicity is the storage collaborator's contract; the
/// engine adds a per-key single-flight lock so concurrent misses on the
/// same key generate at most one value.
pub struct CacheEngine {
    /// Durable bounded collection backing the cache
    storage: Arc<dyn Storage>,
    /// Miss-path value synthesis strategy
    generator: Arc<dyn ValueGenerator>,
    /// Name of the bounded collection
    name: String,
    /// Authoritative entry-count capacity
    max_entries: usize,
    /// Budget for a single storage round trip
    op_timeout: Duration,
    /// One in-flight generation per key; waiters queue on the same lock
    flights: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates a new engine over the given storage and generator.
    pub fn new(
        storage: Arc<dyn Storage>,
        generator: Arc<dyn ValueGenerator>,
        name: impl Into<String>,
        max_entries: usize,
        op_timeout: Duration,
    ) -> Self {
        Self {
            storage,
            generator,
            name: name.into(),
            max_entries,
            op_timeout,
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Runs one storage round trip under the configured timeout.
    ///
    /// A timeout is indistinguishable from an unreachable collaborator and
    /// surfaces as `StorageUnavailable`.
    async fn storage_call<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, StorageError>>,
    {
        match timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::StorageUnavailable(format!(
                "storage operation timed out after {}ms",
                self.op_timeout.as_millis()
            ))),
        }
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        Ok(())
    }

    // == Setup ==
    /// Ensures the bounded, uniquely-keyed collection exists.
    ///
    /// Idempotent; must complete before the engine serves requests. The
    /// byte capacity passed to the backend is advisory sizing derived from
    /// a fixed per-entry estimate; the entry count is the real bound.
    pub async fn setup(&self) -> Result<()> {
        let byte_capacity = self.max_entries * PER_ENTRY_BYTES_ESTIMATE;
        self.storage_call(self.storage.ensure_bounded_unique_collection(
            &self.name,
            self.max_entries,
            byte_capacity,
        ))
        .await?;

        info!(
            collection = %self.name,
            max_entries = self.max_entries,
            byte_capacity,
            "cache collection ready"
        );
        Ok(())
    }

    // == List ==
    /// Returns all keys in insertion order (oldest first) as a
    /// point-in-time snapshot.
    ///
    /// `offset`/`limit` page through the snapshot; both default to the full
    /// sequence, so the unpaginated baseline behavior is unchanged.
    pub async fn list(&self, offset: Option<usize>, limit: Option<usize>) -> Result<Vec<String>> {
        let records = self.storage_call(self.storage.find_all_ordered()).await?;

        let keys = records
            .into_iter()
            .map(|record| record.key)
            .skip(offset.unwrap_or(0))
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(keys)
    }

    // == Get ==
    /// Looks up `key`, generating and persisting a value on miss.
    ///
    /// A hit has no side effects: no timestamp refresh, no reordering. A
    /// miss generates a value, stores it through the same insert-or-replace
    /// path as `set`, and returns it; generate-then-store failure surfaces
    /// as `GenerationFailed`, never as a success with unpersisted state.
    ///
    /// Concurrent misses on the same key are single-flighted: one caller
    /// generates while the rest wait, then re-read the stored value. Misses
    /// on distinct keys proceed concurrently.
    pub async fn get(&self, key: &str) -> Result<Lookup> {
        Self::validate_key(key)?;

        if let Some(record) = self.storage_call(self.storage.find_by_key(key)).await? {
            debug!(key, "cache hit");
            return Ok(Lookup::Hit(record.value));
        }

        // Miss: join or start the single flight for this key
        let flight = {
            let mut flights = self.flights.lock().await;
            flights.entry(key.to_string()).or_default().clone()
        };
        let _guard = flight.lock().await;

        let outcome = self.generate_and_store(key).await;

        // Retire this flight so a later miss starts fresh; only remove the
        // entry if it is still ours
        {
            let mut flights = self.flights.lock().await;
            if let Some(current) = flights.get(key) {
                if Arc::ptr_eq(current, &flight) {
                    flights.remove(key);
                }
            }
        }

        outcome
    }

    /// Miss path body, run while holding the per-key flight lock.
    async fn generate_and_store(&self, key: &str) -> Result<Lookup> {
        // Losers of the flight race land here after the winner stored;
        // re-read before generating
        if let Some(record) = self.storage_call(self.storage.find_by_key(key)).await? {
            debug!(key, "cache hit after awaiting in-flight generation");
            return Ok(Lookup::Hit(record.value));
        }

        info!(key, "cache miss, generating value");
        let value = self.generator.generate(key);
        let record = Record::new(key, value.clone());

        match self.storage_call(self.storage.insert_or_replace(record)).await {
            Ok(_) => Ok(Lookup::Generated(value)),
            Err(err) => Err(CacheError::GenerationFailed {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    // == Set ==
    /// Inserts or replaces the record for `key`, stamping `last_modified`.
    ///
    /// Inserting a new key into a full store evicts the oldest record(s);
    /// replacing never changes the count and never evicts.
    pub async fn set(&self, key: &str, value: Value) -> Result<SetOutcome> {
        Self::validate_key(key)?;

        let record = Record::new(key, value);
        let outcome = self
            .storage_call(self.storage.insert_or_replace(record))
            .await?;

        debug!(key, ?outcome, "set completed");
        Ok(match outcome {
            UpsertOutcome::Created => SetOutcome::Created,
            UpsertOutcome::Replaced => SetOutcome::Updated,
        })
    }

    // == Delete Key ==
    /// Removes the record for `key`; returns whether one was removed.
    ///
    /// Absence is a normal negative result, not a fault.
    pub async fn delete_key(&self, key: &str) -> Result<bool> {
        Self::validate_key(key)?;
        let removed = self.storage_call(self.storage.delete_by_key(key)).await?;
        debug!(key, removed, "delete completed");
        Ok(removed)
    }

    // == Delete All ==
    /// Removes all records, leaving the capacity configuration intact.
    ///
    /// Storage failures are propagated, never discarded.
    pub async fn delete_all(&self) -> Result<()> {
        self.storage_call(self.storage.delete_all()).await?;
        info!(collection = %self.name, "cache cleared");
        Ok(())
    }
}
