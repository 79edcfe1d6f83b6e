//! Error types for docdir core.

use docdir_codec::CodecError;
use docdir_storage::StorageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A collection or resource name was rejected before any I/O.
    Validation,
    /// The target collection or resource does not exist.
    NotFound,
    /// A filesystem operation failed.
    Io,
    /// A document could not be encoded or decoded.
    Serialization,
}

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid collection or resource name.
    #[error("{message}")]
    Validation {
        /// Description of the problem.
        message: String,
    },

    /// Neither the bare nor the suffixed path exists.
    #[error("unable to find file or directory named {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Codec error.
    #[error("serialization error: {0}")]
    Serialization(#[from] CodecError),
}

impl StoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::Io,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Self::Io(e),
            StorageError::NotFound { path } => Self::NotFound { path },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_keep_their_kind() {
        let not_found: StoreError = StorageError::not_found("db/users/alice").into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(
            not_found.to_string(),
            "unable to find file or directory named db/users/alice"
        );

        let io: StoreError = StorageError::Io(io::Error::other("disk full")).into();
        assert_eq!(io.kind(), ErrorKind::Io);
    }

    #[test]
    fn codec_errors_are_serialization() {
        let err: StoreError = CodecError::decoding("eof").into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
        assert!(err.to_string().contains("eof"));
    }
}
