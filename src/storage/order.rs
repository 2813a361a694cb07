//! Insertion Order Module
//!
//! Tracks the order in which keys were first inserted, for FIFO eviction
//! and ordered enumeration.

use std::collections::VecDeque;

// == Insertion Order Tracker ==
/// Tracks key insertion order for FIFO eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest inserted
/// - Back = Newest inserted
///
/// Unlike an LRU tracker, reads and updates never move a key; only first
/// insertion places it and only eviction or deletion removes it.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    /// Keys ordered by first insertion time
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty insertion-order tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Records a key as inserted (appends to the back).
    ///
    /// If the key is already tracked this is a no-op: a replace keeps the
    /// key's original position.
    pub fn record(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest-inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the oldest-inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    // == Snapshot ==
    /// Returns all tracked keys, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    // == Clear ==
    /// Removes all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
