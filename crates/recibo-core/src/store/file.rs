//! File-system backend: one `<key>.json` file per key.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::backend::{KeyValueBackend, StorageResult};
use crate::error::StorageError;

/// Stores each key as a file inside a directory.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a half-written value.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Use `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("receipts").unwrap(), None);
    }

    #[test]
    fn test_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested").join("data"));

        backend.set("receipts", "[]").unwrap();
        backend.set("receipts", "[1]").unwrap();

        assert_eq!(backend.get("receipts").unwrap().as_deref(), Some("[1]"));
        let stored = fs::read_to_string(backend.dir().join("receipts.json")).unwrap();
        assert_eq!(stored, "[1]");

        let leftovers = fs::read_dir(backend.dir()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let backend = FileBackend::new("unused");
        assert!(matches!(backend.path_for("../x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(backend.path_for(""), Err(StorageError::InvalidKey(_))));
        assert!(backend.path_for("receipts").is_ok());
    }
}
