//! Filesystem operations for document files.
//!
//! Every document write goes through [`write_atomic`], which stages the
//! bytes in a uniquely named temporary file next to the target and then
//! renames it into place. A reader of the final path therefore sees either
//! the previous document or the new one, never a partial write.

use crate::error::{StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Suffix carried by every staging file.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Options for [`write_atomic`].
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Fsync the staged file before the rename and the directory after it.
    pub sync: bool,
    /// Permission bits applied to the written file (Unix only).
    pub file_mode: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: true,
            file_mode: 0o644,
        }
    }
}

/// A single entry of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry (lossy UTF-8).
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Returns true if `name` looks like a staging file left by [`write_atomic`].
#[must_use]
pub fn is_temp_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
}

/// Creates `path` and all missing parents.
///
/// Succeeds if the directory already exists. On Unix, newly created
/// directories get `mode` (subject to the process umask).
pub fn create_dir_all(path: &Path, mode: u32) -> StorageResult<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)?;
    Ok(())
}

/// Atomically writes `data` to `dir/file_name`.
///
/// Steps:
/// 1. Write to `dir/.<file_name>.<uuid>.tmp`
/// 2. Sync the staged file (if `options.sync`)
/// 3. Rename it over `dir/file_name`
/// 4. Sync `dir` so the rename itself is durable (if `options.sync`)
///
/// If any of steps 1-3 fails, the staged file is removed and the final
/// path is left untouched. A failure in step 4 is logged and the write
/// still succeeds, since the new contents are already at the final path.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if staging or the rename fails.
pub fn write_atomic(
    dir: &Path,
    file_name: &str,
    data: &[u8],
    options: &WriteOptions,
) -> StorageResult<PathBuf> {
    let final_path = dir.join(file_name);
    let temp_path = dir.join(format!(".{file_name}.{}{TEMP_SUFFIX}", Uuid::new_v4().simple()));

    if let Err(e) = stage_and_rename(&temp_path, &final_path, data, options) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "failed to remove staging file"
                );
            }
        }
        return Err(e.into());
    }

    if options.sync {
        warn_on_directory_sync_failure(dir, sync_directory(dir));
    }

    Ok(final_path)
}

/// Logs a failed directory sync. The renamed document is already in place.
fn warn_on_directory_sync_failure(dir: &Path, result: StorageResult<()>) {
    if let Err(error) = result {
        tracing::warn!(
            dir = %dir.display(),
            error = %error,
            "failed to sync directory after rename"
        );
    }
}

fn stage_and_rename(
    temp_path: &Path,
    final_path: &Path,
    data: &[u8],
    options: &WriteOptions,
) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)?;
    file.write_all(data)?;
    if options.sync {
        file.sync_all()?;
    }
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp_path, fs::Permissions::from_mode(options.file_mode))?;
    }

    fs::rename(temp_path, final_path)
}

/// Syncs a directory so that entry creation, rename and removal are durable.
#[cfg(unix)]
pub fn sync_directory(dir: &Path) -> StorageResult<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

/// Syncs a directory so that entry creation, rename and removal are durable.
///
/// NTFS journals metadata, and directory handles cannot be fsynced on
/// Windows, so this is a no-op there.
#[cfg(not(unix))]
pub fn sync_directory(_dir: &Path) -> StorageResult<()> {
    Ok(())
}

/// Reads the whole file at `path`.
pub fn read_file(path: &Path) -> StorageResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Lists the entries of `dir` in the order the filesystem returns them.
pub fn list_entries(dir: &Path) -> StorageResult<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_dir: entry.file_type()?.is_dir(),
        });
    }
    Ok(entries)
}

/// Removes the file at `path`.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] if the file does not exist.
pub fn remove_file(path: &Path) -> StorageResult<()> {
    fs::remove_file(path).map_err(|e| not_found_or_io(e, path))
}

/// Removes `path` and everything below it.
///
/// # Errors
///
/// Returns [`StorageError::NotFound`] if the directory does not exist.
pub fn remove_dir_all(path: &Path) -> StorageResult<()> {
    fs::remove_dir_all(path).map_err(|e| not_found_or_io(e, path))
}

fn not_found_or_io(e: io::Error, path: &Path) -> StorageError {
    if e.kind() == io::ErrorKind::NotFound {
        StorageError::not_found(path)
    } else {
        StorageError::Io(e)
    }
}
