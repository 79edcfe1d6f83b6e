//! Per-collection lock registry.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Lock serializing writes and deletes within one collection.
pub type CollectionLock = Arc<Mutex<()>>;

/// Create-or-fetch table of collection locks.
///
/// # Invariants
///
/// - At most one lock exists per collection name
/// - Entries are never removed, so a returned lock stays the collection's
///   lock for the registry's lifetime
/// - The registry mutex is held only for the lookup/insert, never while
///   a collection lock is being acquired
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it if absent.
    pub fn get_or_create(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }
        let lock = CollectionLock::default();
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Returns true if a lock was ever created for `collection`.
    #[must_use]
    pub fn contains(&self, collection: &str) -> bool {
        self.locks.lock().contains_key(collection)
    }

    /// Number of collections with a lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Returns true if no lock has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
