//! Persistence errors
//!
//! I/O failures are classified (permission, disk full, missing file) so the
//! caller can show a useful warning without aborting the edit that
//! triggered the save.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Disk full or quota exceeded while writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not move '{from}' into place at '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be encoded for saving
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing store refused the operation (non-file adapters)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Classify an I/O error that happened while reading `path`
    pub fn read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::Read {
                path,
                source: error,
            },
        }
    }

    /// Classify an I/O error that happened while writing `path`
    pub fn write(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::Write {
                path,
                source: error,
            },
        }
    }

    /// Suggested fix to show alongside the warning
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => {
                Some("Free up disk space; changes stay in memory until the next successful save.")
            }
            StorageError::PermissionDenied { .. } => {
                Some("Check permissions on the data directory or set GIFTWRAP_DATA_DIR.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and is writable.")
            }
            _ => None,
        }
    }
}

fn is_disk_full(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

pub type StorageResult<T> = Result<T, StorageError>;
