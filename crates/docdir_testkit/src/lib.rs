//! # docdir Testkit
//!
//! Test utilities for docdir.
//!
//! This crate provides:
//! - Temporary store fixtures that clean up after themselves
//! - Property-based test generators using proptest
//! - Concurrent stress helpers
//!
//! ## Usage
//!
//! ```rust
//! use docdir_testkit::prelude::*;
//!
//! with_temp_store(|store| {
//!     store.write("users", "alice", &sample_document(1)).unwrap();
//!     assert_eq!(store.list("users").unwrap(), vec!["alice"]);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use stress::*;
