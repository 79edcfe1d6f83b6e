//! Test fixtures and store helpers.

use docdir_core::{Config, Store};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::TempDir;

/// A store on a temporary directory, removed on drop.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates a store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a store that skips fsync, for fast tests.
    pub fn fast() -> Self {
        Self::with_config(Config::new().sync_writes(false))
    }

    /// Creates a store with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Store::open_with_config(temp_dir.path().join("db"), config)
            .expect("Failed to open store");
        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the store root.
    pub fn path(&self) -> &Path {
        self.store.root()
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary store.
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&Store) -> R,
{
    let test_store = TestStore::fast();
    f(&test_store.store)
}

/// A small document type used across tests and benchmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SampleDocument {
    /// Sequence number.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Arbitrary payload.
    pub payload: String,
}

/// Builds a sample document whose fields derive from `id`.
pub fn sample_document(id: u64) -> SampleDocument {
    SampleDocument {
        id,
        name: format!("doc-{id}"),
        payload: String::new(),
    }
}

/// Builds a sample document with a payload of roughly `size` bytes.
pub fn sized_document(id: u64, size: usize) -> SampleDocument {
    SampleDocument {
        payload: "x".repeat(size),
        ..sample_document(id)
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a store with `count` documents in `collection`, named `doc-0`, `doc-1`, ...
    pub fn populated_store(collection: &str, count: usize) -> TestStore {
        let test_store = TestStore::fast();
        for i in 0..count as u64 {
            test_store
                .write(collection, &format!("doc-{i}"), &sample_document(i))
                .expect("Failed to write document");
        }
        test_store
    }

    /// Creates a store with `collections` collections of `per_collection` documents each.
    pub fn multi_collection_store(
        collections: usize,
        per_collection: usize,
    ) -> (TestStore, Vec<String>) {
        let test_store = TestStore::fast();
        let names: Vec<String> = (0..collections).map(|c| format!("collection-{c}")).collect();
        for name in &names {
            for i in 0..per_collection as u64 {
                test_store
                    .write(name, &format!("doc-{i}"), &sample_document(i))
                    .expect("Failed to write document");
            }
        }
        (test_store, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_store_is_removed_on_drop() {
        let root = {
            let store = TestStore::new();
            assert!(store.path().is_dir());
            store.path().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn populated_store_has_documents() {
        let store = scenarios::populated_store("items", 5);
        assert_eq!(store.list("items").unwrap().len(), 5);

        let doc: SampleDocument = store.read("items", "doc-3").unwrap();
        assert_eq!(doc, sample_document(3));
    }

    #[test]
    fn multi_collection_store_layout() {
        let (store, names) = scenarios::multi_collection_store(3, 2);
        assert_eq!(store.collections().unwrap(), names);
        for name in &names {
            assert_eq!(store.read_all(name).unwrap().len(), 2);
        }
    }
}
