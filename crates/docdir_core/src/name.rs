//! Collection and resource name checks.

use crate::error::{StoreError, StoreResult};

pub(crate) const MISSING_COLLECTION_WRITE: &str = "missing collection - no place to save records";
pub(crate) const MISSING_COLLECTION_READ: &str = "missing collection - unable to read";
pub(crate) const MISSING_RESOURCE: &str = "missing resource - unable to save record (no name)";

/// Checks a collection or resource name before it touches the filesystem.
///
/// Empty names fail with `missing`. Names that would escape their parent
/// directory (separators, NUL, `.` and `..`) are rejected as well.
pub(crate) fn validate(name: &str, missing: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::validation(missing));
    }
    if name == "." || name == ".." || name.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(StoreError::validation(format!(
            "invalid name {name:?}: must be a single path component"
        )));
    }
    Ok(())
}
