//! Key/value persistence for the gift document
//!
//! The store writes the whole document as text under one fixed key after
//! every mutation, and reads it back once at startup. Two adapters are
//! provided:
//!
//! - [`FilePersistence`]: one `<key>.json` file per key in the data
//!   directory, written atomically (temp file, fsync, rename)
//! - [`MemoryPersistence`]: an in-process map, for tests and embedding

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// Key the document is stored under
pub const DOCUMENT_KEY: &str = "gift-builder-config";

/// Key the bulk-action selection is stored under
pub const SELECTION_KEY: &str = "gift-builder-selection";

/// Suffix appended to a key when an undecodable value is set aside
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt.backup";

/// Durable text storage addressed by key
pub trait Persistence {
    /// Read the value for `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value for `key`
    fn save(&mut self, key: &str, text: &str) -> StorageResult<()>;

    /// Copy the current value of `key` aside before it gets overwritten
    ///
    /// Returns the key the copy was written under.
    fn backup_corrupt(&mut self, key: &str) -> StorageResult<Option<String>> {
        match self.load(key)? {
            Some(text) => {
                let backup_key = format!("{}{}", key, CORRUPT_BACKUP_SUFFIX);
                self.save(&backup_key, &text)?;
                Ok(Some(backup_key))
            }
            None => Ok(None),
        }
    }
}

/// Filesystem-backed persistence
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    /// Store files directly in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store files in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}

impl Persistence for FilePersistence {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(e, path)),
        }
    }

    fn save(&mut self, key: &str, text: &str) -> StorageResult<()> {
        atomic_write(&self.path_for(key), text.as_bytes())
    }
}

/// In-memory persistence
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    values: HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value already stored under `key`
    pub fn with_value(key: &str, text: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), text.into());
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, text: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

/// Write a file so readers only ever see the old or the new contents
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path).map_err(|e| StorageError::write(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::write(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::write(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let mut persistence = FilePersistence::new(temp_dir.path());

        assert!(!persistence.exists(DOCUMENT_KEY));
        assert!(persistence.load(DOCUMENT_KEY).unwrap().is_none());

        persistence.save(DOCUMENT_KEY, "{\"blocks\": []}").unwrap();
        assert!(persistence.exists(DOCUMENT_KEY));
        assert_eq!(
            persistence.load(DOCUMENT_KEY).unwrap().as_deref(),
            Some("{\"blocks\": []}")
        );
    }

    #[test]
    fn test_file_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut persistence = FilePersistence::new(temp_dir.path());

        persistence.save(DOCUMENT_KEY, "first").unwrap();
        persistence.save(DOCUMENT_KEY, "second").unwrap();
        assert_eq!(
            persistence.load(DOCUMENT_KEY).unwrap().as_deref(),
            Some("second")
        );

        // No temp file left behind
        assert!(!persistence.path_for(DOCUMENT_KEY).with_extension("tmp").exists());
    }

    #[test]
    fn test_keys_are_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut persistence = FilePersistence::new(temp_dir.path());

        persistence.save(DOCUMENT_KEY, "doc").unwrap();
        persistence.save(SELECTION_KEY, "[]").unwrap();

        assert_eq!(
            persistence.load(DOCUMENT_KEY).unwrap().as_deref(),
            Some("doc")
        );
        assert_eq!(
            persistence.load(SELECTION_KEY).unwrap().as_deref(),
            Some("[]")
        );
        assert!(persistence
            .path_for(DOCUMENT_KEY)
            .ends_with("gift-builder-config.json"));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut persistence = FilePersistence::new(&nested);

        persistence.save(DOCUMENT_KEY, "nested").unwrap();
        assert!(nested.join("gift-builder-config.json").exists());
    }

    #[test]
    fn test_backup_corrupt_copies_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut persistence = FilePersistence::new(temp_dir.path());

        assert!(persistence.backup_corrupt(DOCUMENT_KEY).unwrap().is_none());

        persistence.save(DOCUMENT_KEY, "garbage{").unwrap();
        let backup_key = persistence.backup_corrupt(DOCUMENT_KEY).unwrap().unwrap();
        assert_eq!(backup_key, "gift-builder-config.corrupt.backup");
        assert_eq!(
            persistence.load(&backup_key).unwrap().as_deref(),
            Some("garbage{")
        );
    }

    #[test]
    fn test_memory_persistence() {
        let mut persistence = MemoryPersistence::with_value(DOCUMENT_KEY, "x");
        assert_eq!(persistence.get(DOCUMENT_KEY), Some("x"));

        persistence.save(DOCUMENT_KEY, "y").unwrap();
        assert_eq!(
            persistence.load(DOCUMENT_KEY).unwrap().as_deref(),
            Some("y")
        );
        assert!(persistence.load(SELECTION_KEY).unwrap().is_none());
    }
}
