//! CLI command implementations.

pub mod collection;
pub mod document;
pub mod seed;
