//! # docdir Codec
//!
//! Document serializers for docdir.
//!
//! A [`Codec`] turns any `serde` value into bytes and back, and names the
//! file suffix its documents are stored under. The store only requires the
//! byte representation to be deterministic and round-trip safe.
//!
//! ## Available Codecs
//!
//! - [`JsonCodec`] - tab-indented JSON with a trailing newline (default)
//! - [`CborCodec`] - compact binary CBOR
//!
//! ## Usage
//!
//! ```
//! use docdir_codec::{Codec, JsonCodec};
//!
//! let codec = JsonCodec::default();
//! let bytes = codec.encode(&vec!["a", "b"]).unwrap();
//! let decoded: Vec<String> = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded, vec!["a", "b"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cbor;
mod error;
mod json;

pub use cbor::{CborCodec, CBOR_EXTENSION};
pub use error::{CodecError, CodecResult};
pub use json::{JsonCodec, JSON_EXTENSION};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A pluggable encode/decode strategy for documents.
///
/// # Invariants
///
/// - `encode` is deterministic: equal values produce equal bytes
/// - `decode(encode(v))` yields a value equal to `v`
/// - `extension` is constant for the codec's lifetime
pub trait Codec: Send + Sync {
    /// Suffix appended to resource names on disk, including the dot.
    fn extension(&self) -> &str;

    /// Encodes a document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodingFailed`] if the value cannot be represented.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>>;

    /// Decodes a document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecodingFailed`] on malformed input.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CodecResult<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn roundtrip<C: Codec>(codec: &C, value: &BTreeMap<String, i64>) -> BTreeMap<String, i64> {
        let bytes = codec.encode(value).unwrap();
        codec.decode(&bytes).unwrap()
    }

    proptest! {
        #[test]
        fn json_roundtrip(
            map in prop::collection::btree_map("[a-zA-Z0-9 ]{0,12}", any::<i64>(), 0..16),
        ) {
            prop_assert_eq!(roundtrip(&JsonCodec::default(), &map), map);
        }

        #[test]
        fn cbor_roundtrip(
            map in prop::collection::btree_map("[a-zA-Z0-9 ]{0,12}", any::<i64>(), 0..16),
        ) {
            prop_assert_eq!(roundtrip(&CborCodec, &map), map);
        }

        #[test]
        fn json_ends_with_newline(
            map in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..8),
        ) {
            let bytes = JsonCodec::default().encode(&map).unwrap();
            prop_assert_eq!(bytes.last(), Some(&b'\n'));
        }
    }
}
