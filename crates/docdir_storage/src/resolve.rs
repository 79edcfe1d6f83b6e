//! Suffix-fallback path resolution.
//!
//! A collection or resource can be addressed with or without the document
//! suffix. [`resolve`] probes the bare path first and falls back to the
//! suffixed one, so callers never duplicate that logic.

use crate::error::{StorageError, StorageResult};
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a successful [`resolve`].
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The path existed exactly as given.
    Bare {
        /// The probed path.
        path: PathBuf,
        /// Its metadata.
        metadata: Metadata,
    },
    /// Only `path + suffix` existed.
    Suffixed {
        /// The suffixed path.
        path: PathBuf,
        /// Its metadata.
        metadata: Metadata,
    },
}

impl Resolved {
    /// The path that actually exists on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Bare { path, .. } | Self::Suffixed { path, .. } => path,
        }
    }

    /// Metadata of the resolved target.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        match self {
            Self::Bare { metadata, .. } | Self::Suffixed { metadata, .. } => metadata,
        }
    }

    /// Returns true if the target is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.metadata().is_dir()
    }

    /// Returns true if the target is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.metadata().is_file()
    }

    /// Returns true if the target was only found with the suffix appended.
    #[must_use]
    pub fn is_suffixed(&self) -> bool {
        matches!(self, Self::Suffixed { .. })
    }
}

/// Appends `suffix` to the final component of `path`.
///
/// Unlike [`Path::with_extension`] this never replaces an existing
/// extension: `a.b` with `.json` becomes `a.b.json`.
#[must_use]
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Resolves `path`, falling back to `path + suffix`.
///
/// Only a missing bare path triggers the fallback; any other I/O error
/// on the first probe is returned as is.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] if neither path exists, or
/// [`StorageError::Io`] if a probe fails for another reason.
pub fn resolve(path: &Path, suffix: &str) -> StorageResult<Resolved> {
    match fs::metadata(path) {
        Ok(metadata) => {
            return Ok(Resolved::Bare {
                path: path.to_path_buf(),
                metadata,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let suffixed = with_suffix(path, suffix);
    match fs::metadata(&suffixed) {
        Ok(metadata) => Ok(Resolved::Suffixed {
            path: suffixed,
            metadata,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::not_found(path)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn suffix_is_appended_not_replaced() {
        assert_eq!(
            with_suffix(Path::new("db/users/alice"), ".json"),
            PathBuf::from("db/users/alice.json")
        );
        assert_eq!(
            with_suffix(Path::new("db/users/a.b"), ".json"),
            PathBuf::from("db/users/a.b.json")
        );
    }

    #[test]
    fn resolves_bare_path_first() {
        let dir = tempdir().unwrap();
        let bare = dir.path().join("alice");
        fs::write(&bare, b"bare").unwrap();
        fs::write(dir.path().join("alice.json"), b"suffixed").unwrap();

        let resolved = resolve(&bare, ".json").unwrap();
        assert!(!resolved.is_suffixed());
        assert_eq!(resolved.path(), bare);
        assert!(resolved.is_file());
    }

    #[test]
    fn falls_back_to_suffixed_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alice.json"), b"{}").unwrap();

        let resolved = resolve(&dir.path().join("alice"), ".json").unwrap();
        assert!(resolved.is_suffixed());
        assert_eq!(resolved.path(), dir.path().join("alice.json"));
    }

    #[test]
    fn resolves_directories() {
        let dir = tempdir().unwrap();
        let users = dir.path().join("users");
        fs::create_dir(&users).unwrap();

        let resolved = resolve(&users, ".json").unwrap();
        assert!(resolved.is_dir());
        assert!(!resolved.is_file());
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nobody");

        let err = resolve(&missing, ".json").unwrap_err();
        assert!(err.is_not_found());
        match err {
            StorageError::NotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
