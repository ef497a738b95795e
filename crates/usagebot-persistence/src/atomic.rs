//! Atomic JSON file operations.

use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Serializes a value as pretty JSON and writes it to `path` atomically.
///
/// The data is written to a temporary file in the target directory and then
/// renamed over the destination, so concurrent readers see either the old
/// file or the new one, never a truncated mix. The temp file must live in
/// the same directory for the rename to stay a same-filesystem move.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
        PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    temp.write_all(json.as_bytes())
        .and_then(|_| temp.flush())
        .map_err(|source| PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    temp.persist(path).map_err(|e| PersistenceError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Reads and deserializes a JSON file, returning `None` when it does not
/// exist yet.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(Some(serde_json::from_str(&raw)?))
}
