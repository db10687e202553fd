//! Document identifiers
//!
//! New documents get a random UUID encoded as bs58check, which is short,
//! URL-safe and carries a checksum. Documents imported from elsewhere may
//! carry any non-empty string as their id; those are kept as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentIdError {
    #[error("Document ID is empty")]
    Empty,

    #[error("Invalid bs58check encoding: {0}")]
    InvalidEncoding(String),

    #[error("Expected 16 bytes, got {0}")]
    InvalidLength(usize),
}

/// Identifier of a gift document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Encode a UUID as bs58check
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(bs58::encode(uuid.as_bytes()).with_check().into_string())
    }

    /// Accept any non-empty id (as found in imported documents)
    pub fn parse(s: &str) -> Result<Self, DocumentIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DocumentIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Decode back to the UUID, if this id was generated here
    pub fn to_uuid(&self) -> Result<Uuid, DocumentIdError> {
        let bytes = bs58::decode(&self.0)
            .with_check(None)
            .into_vec()
            .map_err(|e| DocumentIdError::InvalidEncoding(e.to_string()))?;

        let array: [u8; 16] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| DocumentIdError::InvalidLength(bytes.len()))?;
        Ok(Uuid::from_bytes(array))
    }

    /// Whether this id is a bs58check-encoded UUID
    pub fn is_canonical(&self) -> bool {
        self.to_uuid().is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique_and_canonical() {
        let a = DocumentId::new();
        let b = DocumentId::new();
        assert_ne!(a, b);
        assert!(a.is_canonical());
    }

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = DocumentId::from_uuid(uuid);
        assert_eq!(id.to_uuid().unwrap(), uuid);
    }

    #[test]
    fn test_parse_keeps_foreign_ids() {
        let id = DocumentId::parse("k3x9q2m1z").unwrap();
        assert_eq!(id.as_str(), "k3x9q2m1z");
        assert!(!id.is_canonical());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(DocumentId::parse("   "), Err(DocumentIdError::Empty));
    }

    #[test]
    fn test_corrupted_checksum_is_not_canonical() {
        let id = DocumentId::new();
        let mut s = id.as_str().to_string();
        let last = s.pop().unwrap();
        s.push(if last == '1' { '2' } else { '1' });
        let tampered = DocumentId::parse(&s).unwrap();
        assert!(!tampered.is_canonical());
    }
}
