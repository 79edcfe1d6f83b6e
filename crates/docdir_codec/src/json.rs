//! Pretty-printed JSON codec.

use crate::error::{CodecError, CodecResult};
use crate::Codec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// File suffix of JSON documents.
pub const JSON_EXTENSION: &str = ".json";

/// The default codec: indented JSON terminated by a newline.
///
/// Output is deterministic for a given value, since struct fields are
/// emitted in declaration order and maps in their iteration order.
///
/// ```
/// use docdir_codec::{Codec, JsonCodec};
/// use std::collections::BTreeMap;
///
/// let mut doc = BTreeMap::new();
/// doc.insert("Name", "Alice");
///
/// let bytes = JsonCodec::default().encode(&doc).unwrap();
/// assert_eq!(bytes, b"{\n\t\"Name\": \"Alice\"\n}\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCodec {
    indent: Vec<u8>,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self {
            indent: b"\t".to_vec(),
        }
    }
}

impl JsonCodec {
    /// Creates a codec that indents with a tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with a custom indent string.
    #[must_use]
    pub fn with_indent(indent: impl Into<Vec<u8>>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl Codec for JsonCodec {
    fn extension(&self) -> &str {
        JSON_EXTENSION
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value
            .serialize(&mut ser)
            .map_err(|e| CodecError::encoding(e.to_string()))?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CodecResult<T> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decoding(e.to_string()))
    }
}
