//! Raw document payloads.

/// An undecoded document as stored on disk, as returned by
/// [`Store::read_all`](crate::Store::read_all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    resource: String,
    bytes: Vec<u8>,
}

impl RawDocument {
    /// Creates a raw document.
    #[must_use]
    pub fn new(resource: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            resource: resource.into(),
            bytes,
        }
    }

    /// Resource name, without the document suffix.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The serialized payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The payload as text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Consumes the document, returning the payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for RawDocument {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
