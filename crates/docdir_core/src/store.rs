//! Store facade: the document CRUD operations.

use crate::config::Config;
use crate::document::RawDocument;
use crate::error::{StoreError, StoreResult};
use crate::lock::{CollectionLock, LockRegistry};
use crate::name::{self, MISSING_COLLECTION_READ, MISSING_COLLECTION_WRITE, MISSING_RESOURCE};
use docdir_codec::{Codec, JsonCodec};
use docdir_storage::{self as storage, with_suffix, StorageError, WriteOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// A document store rooted at one directory.
///
/// Each collection is a subdirectory of the root and each resource a
/// single file `<resource><suffix>` inside it, where the suffix comes from
/// the store's [`Codec`].
///
/// ```text
/// <root>/
/// ├─ users/
/// │  ├─ alice.json
/// │  └─ bob.json
/// └─ posts/
///    └─ hello.json
/// ```
///
/// # Concurrency
///
/// `Store` is `Send + Sync`; share it through an `Arc`. Writes and deletes
/// on the same collection are serialized by a per-collection lock, while
/// different collections proceed in parallel. Reads take no lock unless
/// [`Config::lock_reads`] is set; because writes replace files by atomic
/// rename, an unlocked read still never observes a partially written
/// document.
///
/// # Example
///
/// ```rust
/// use docdir_core::Store;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = Store::open(dir.path().join("db")).unwrap();
///
/// let alice = User { name: "Alice".into() };
/// store.write("users", "alice", &alice).unwrap();
///
/// let read: User = store.read("users", "alice").unwrap();
/// assert_eq!(read, alice);
///
/// store.delete("users", "alice").unwrap();
/// assert!(store.read::<User>("users", "alice").unwrap_err().is_not_found());
/// ```
#[derive(Debug)]
pub struct Store<C: Codec = JsonCodec> {
    root: PathBuf,
    config: Config,
    codec: C,
    locks: LockRegistry,
}

impl Store<JsonCodec> {
    /// Opens a JSON store at `path` with the default configuration,
    /// creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a JSON store at `path` with a custom configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> StoreResult<Self> {
        Self::with_codec(path, config, JsonCodec::default())
    }
}

impl<C: Codec> Store<C> {
    /// Opens a store at `path` that serializes documents with `codec`.
    ///
    /// The path is lexically normalized. An existing directory is reused
    /// as is; a missing one is created together with its parents unless
    /// [`Config::create_if_missing`] is false.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if the root is missing and may not be created
    /// - [`StoreError::Io`] if the root exists but is not a directory, or
    ///   cannot be created
    pub fn with_codec(path: impl AsRef<Path>, config: Config, codec: C) -> StoreResult<Self> {
        let root = normalize(path.as_ref());

        match fs::metadata(&root) {
            Ok(metadata) if metadata.is_dir() => {
                debug!(root = %root.display(), "using existing store (database already exists)");
            }
            Ok(_) => {
                return Err(StoreError::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("store root is not a directory: {}", root.display()),
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if !config.create_if_missing {
                    return Err(StoreError::not_found(root));
                }
                debug!(root = %root.display(), "creating store");
                storage::create_dir_all(&root, config.dir_mode)?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            root,
            config,
            codec,
            locks: LockRegistry::new(),
        })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration the store was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The store's codec.
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Writes `document` as `resource` in `collection`, replacing any
    /// previous version.
    ///
    /// The collection directory is created on first write. The document is
    /// encoded, staged in a temporary file and renamed over
    /// `<collection>/<resource><suffix>`, so the final path always holds a
    /// complete document.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::Serialization`] if the document cannot be encoded
    /// - [`StoreError::Io`] if the directory, temp file or rename fails;
    ///   the final path is left untouched
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        resource: &str,
        document: &T,
    ) -> StoreResult<()> {
        name::validate(collection, MISSING_COLLECTION_WRITE)?;
        name::validate(resource, MISSING_RESOURCE)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = self.root.join(collection);
        storage::create_dir_all(&dir, self.config.dir_mode)?;

        let bytes = self.codec.encode(document)?;
        let file_name = format!("{resource}{}", self.codec.extension());
        let options = WriteOptions {
            sync: self.config.sync_writes,
            file_mode: self.config.file_mode,
        };
        storage::write_atomic(&dir, &file_name, &bytes, &options)?;

        debug!(collection, resource, bytes = bytes.len(), "wrote document");
        Ok(())
    }

    /// Reads and decodes `resource` from `collection`.
    ///
    /// The resource is found whether or not `resource` already carries the
    /// document suffix.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::NotFound`] if no such resource exists
    /// - [`StoreError::Serialization`] if the stored bytes are malformed
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> StoreResult<T> {
        name::validate(collection, MISSING_COLLECTION_READ)?;
        name::validate(resource, MISSING_RESOURCE)?;

        let lock = self.read_lock(collection);
        let _guard = lock.as_ref().map(|l| l.lock());

        let base = self.root.join(collection).join(resource);
        let resolved = storage::resolve(&base, self.codec.extension())?;
        if !resolved.is_file() {
            return Err(StoreError::not_found(base));
        }

        let bytes = storage::read_file(resolved.path())?;
        trace!(collection, resource, bytes = bytes.len(), "read document");
        Ok(self.codec.decode(&bytes)?)
    }

    /// Returns the raw serialized payload of every resource in
    /// `collection`, in directory listing order.
    ///
    /// Payloads are not decoded; use [`Store::decode`] for that. The listing
    /// is best effort: resources written or deleted concurrently may or may
    /// not appear.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::NotFound`] if the collection does not exist
    /// - [`StoreError::Io`] if any entry cannot be read; no partial result
    ///   is returned
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>> {
        name::validate(collection, MISSING_COLLECTION_READ)?;

        let lock = self.read_lock(collection);
        let _guard = lock.as_ref().map(|l| l.lock());

        let resolved = storage::resolve(&self.root.join(collection), self.codec.extension())?;

        let mut documents = Vec::new();
        for entry in storage::list_entries(resolved.path())? {
            if storage::is_temp_file(&entry.name) {
                continue;
            }
            let bytes = storage::read_file(&entry.path)?;
            documents.push(RawDocument::new(self.resource_name(&entry.name), bytes));
        }

        debug!(collection, count = documents.len(), "read collection");
        Ok(documents)
    }

    /// Decodes a payload returned by [`Store::read_all`].
    pub fn decode<T: DeserializeOwned>(&self, document: &RawDocument) -> StoreResult<T> {
        Ok(self.codec.decode(document.bytes())?)
    }

    /// Deletes `resource` from `collection`.
    ///
    /// The path `<collection>/<resource>` is resolved with the suffix
    /// fallback, then:
    /// - a directory is removed recursively
    /// - a file causes `<collection>/<resource><suffix>` to be removed
    ///
    /// Note the first branch: a resource name that matches a directory
    /// removes that whole directory. Use [`Store::delete_collection`] to
    /// drop a collection on purpose.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::NotFound`] if nothing exists at the path, if the path
    ///   is neither a directory nor a regular file, or if a file was found
    ///   but its suffixed variant does not exist
    /// - [`StoreError::Io`] if removal fails
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        name::validate(collection, MISSING_COLLECTION_WRITE)?;
        name::validate(resource, MISSING_RESOURCE)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let base = self.root.join(collection).join(resource);
        let resolved = storage::resolve(&base, self.codec.extension())?;

        if resolved.is_dir() {
            debug!(collection, resource, "deleting directory");
            storage::remove_dir_all(resolved.path())?;
        } else if resolved.is_file() {
            debug!(collection, resource, "deleting document");
            storage::remove_file(&with_suffix(&base, self.codec.extension()))?;
        } else {
            return Err(StoreError::not_found(base));
        }
        Ok(())
    }

    /// Deletes `collection` and every resource in it.
    ///
    /// The lock entry of the collection is kept; writing to the collection
    /// again recreates its directory.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::NotFound`] if the collection does not exist
    /// - [`StoreError::Io`] if removal fails
    pub fn delete_collection(&self, collection: &str) -> StoreResult<()> {
        name::validate(collection, MISSING_COLLECTION_WRITE)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = self.root.join(collection);
        let resolved = storage::resolve(&dir, self.codec.extension())?;
        if !resolved.is_dir() {
            return Err(StoreError::not_found(dir));
        }

        debug!(collection, "deleting collection");
        storage::remove_dir_all(resolved.path())?;
        Ok(())
    }

    /// Returns true if `resource` exists in `collection`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::Io`] if the lookup fails for a reason other than absence
    pub fn exists(&self, collection: &str, resource: &str) -> StoreResult<bool> {
        name::validate(collection, MISSING_COLLECTION_READ)?;
        name::validate(resource, MISSING_RESOURCE)?;

        let base = self.root.join(collection).join(resource);
        match storage::resolve(&base, self.codec.extension()) {
            Ok(resolved) => Ok(resolved.is_file()),
            Err(StorageError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists the resource names in `collection`, sorted.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] for an empty or invalid name
    /// - [`StoreError::NotFound`] if the collection does not exist
    pub fn list(&self, collection: &str) -> StoreResult<Vec<String>> {
        name::validate(collection, MISSING_COLLECTION_READ)?;

        let resolved = storage::resolve(&self.root.join(collection), self.codec.extension())?;
        let mut names: Vec<String> = storage::list_entries(resolved.path())?
            .into_iter()
            .filter(|entry| !entry.is_dir && !storage::is_temp_file(&entry.name))
            .map(|entry| self.resource_name(&entry.name))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Lists the collections in the store, sorted.
    pub fn collections(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = storage::list_entries(&self.root)?
            .into_iter()
            .filter(|entry| entry.is_dir)
            .map(|entry| entry.name)
            .collect();
        names.sort();
        Ok(names)
    }

    fn read_lock(&self, collection: &str) -> Option<CollectionLock> {
        self.config
            .lock_reads
            .then(|| self.locks.get_or_create(collection))
    }

    fn resource_name(&self, file_name: &str) -> String {
        file_name
            .strip_suffix(self.codec.extension())
            .unwrap_or(file_name)
            .to_string()
    }
}

/// Lexically normalizes `path`: drops `.` components and redundant
/// separators, and collapses `name/..` pairs. A `..` directly under the
/// root prefix is dropped; leading `..` of a relative path is kept. An
/// empty result becomes `.`.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    let normalized: PathBuf = parts.iter().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
