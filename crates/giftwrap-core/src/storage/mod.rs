//! Storage layer
//!
//! The document is persisted as interchange-format text under a single key.
//! Every accepted mutation is written through before the operation returns;
//! the document is read once at startup.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{
    FilePersistence, MemoryPersistence, Persistence, CORRUPT_BACKUP_SUFFIX, DOCUMENT_KEY,
    SELECTION_KEY,
};
