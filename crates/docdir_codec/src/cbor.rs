//! Binary CBOR codec.

use crate::error::{CodecError, CodecResult};
use crate::Codec;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// File suffix of CBOR documents.
pub const CBOR_EXTENSION: &str = ".cbor";

/// Compact CBOR documents, for stores that never need to be read by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CborCodec;

impl Codec for CborCodec {
    fn extension(&self) -> &str {
        CBOR_EXTENSION
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf).map_err(|e| CodecError::encoding(e.to_string()))?;
        Ok(buf)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CodecResult<T> {
        ciborium::from_reader(bytes).map_err(|e| CodecError::decoding(e.to_string()))
    }
}
