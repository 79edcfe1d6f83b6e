//! # docdir Core
//!
//! A small persistent document store on top of the filesystem.
//!
//! This crate provides:
//! - [`Store`] with write, read, read-all and delete over collections of
//!   named documents
//! - Crash-safe writes (temp file + atomic rename)
//! - Per-collection locking through a [`LockRegistry`]
//! - Pluggable serialization via [`Codec`] (JSON by default)
//!
//! There is no query language, no indexing beyond listing and no
//! multi-document transaction.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod lock;
mod name;
mod store;

pub use config::Config;
pub use docdir_codec::{CborCodec, Codec, CodecError, JsonCodec};
pub use document::RawDocument;
pub use error::{ErrorKind, StoreError, StoreResult};
pub use lock::{CollectionLock, LockRegistry};
pub use store::Store;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
