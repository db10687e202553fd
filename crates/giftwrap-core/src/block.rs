//! Blocks: identity, style and content
//!
//! A [`Block`] is one addressable unit of a gift document. Its id is opaque
//! and only ever compared for equality; its style is four independent
//! presentation hints; its content is a [`BlockContent`] tagged by type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{BlockContent, BlockKind};

/// Opaque block identifier, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a new random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for display only
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    /// Check if a query string is a prefix of this id
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Background behind a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Transparent,
    White,
    /// Tinted with the theme's secondary colour
    #[serde(rename = "primary")]
    PrimaryTint,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    Compact,
    #[default]
    Normal,
    Spacious,
}

/// Layout width hint; `Half` lets two neighbouring blocks share a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    #[default]
    Full,
    Half,
}

/// Per-block presentation
///
/// The default is `{transparent, center, normal, full}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStyle {
    #[serde(alias = "bg")]
    pub background: Background,
    pub align: Align,
    pub padding: Padding,
    pub width: Width,
}

/// One block of a gift document
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub style: BlockStyle,
}

impl Block {
    /// Create a block of the given type tag with default content and style
    ///
    /// Unrecognized tags are accepted and produce an empty unknown block.
    pub fn new(tag: &str) -> Self {
        Self::with_id(BlockId::generate(), BlockContent::default_for_tag(tag))
    }

    /// Create a block with a specific id and content (for loading and copying)
    pub fn with_id(id: BlockId, content: BlockContent) -> Self {
        Self {
            id,
            content,
            style: BlockStyle::default(),
        }
    }

    /// Type tag as written in the interchange file
    pub fn type_tag(&self) -> &str {
        self.content.type_tag()
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.content.kind()
    }

    /// Deep copy under a new id
    pub fn duplicate_as(&self, id: BlockId) -> Self {
        Self {
            id,
            content: self.content.clone(),
            style: self.style,
        }
    }
}
