//! # docdir Storage
//!
//! Filesystem primitives for docdir.
//!
//! This crate knows nothing about documents or collections. It provides:
//!
//! - [`resolve`] - probe a path, falling back to `path + suffix`
//! - [`write_atomic`] - write-to-temp then rename, optionally fsynced
//! - directory listing and removal helpers with `NotFound` classification
//!
//! ## Example
//!
//! ```rust
//! use docdir_storage::{resolve, write_atomic, WriteOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! write_atomic(dir.path(), "alice.json", b"{}\n", &WriteOptions::default()).unwrap();
//!
//! let resolved = resolve(&dir.path().join("alice"), ".json").unwrap();
//! assert!(resolved.is_suffixed());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod resolve;

pub use error::{StorageError, StorageResult};
pub use file::{
    create_dir_all, is_temp_file, list_entries, read_file, remove_dir_all, remove_file,
    sync_directory, write_atomic, DirEntry, WriteOptions, TEMP_SUFFIX,
};
pub use resolve::{resolve, with_suffix, Resolved};
