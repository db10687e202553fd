//! Interchange format
//!
//! Encodes a whole [`Document`] as pretty-printed JSON and decodes it back.
//! The same text is used for the export file and for local persistence.
//!
//! ```text
//! {
//!   "schemaVersion": 1,
//!   "themeKey": "modern",
//!   "customTheme": { "name", "bg", "primary", "secondary", "text", "font", "particles" },
//!   "blocks": [ { "id", "type", "content", "style" }, ... ],
//!   "documentId": "..."
//! }
//! ```
//!
//! Decoding is all-or-nothing: a payload is either accepted whole or
//! rejected with an [`ImportError`]. Files written before `schemaVersion`
//! existed, and files using the older `theme`/`id`/`bg` field names, are
//! still accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::block::{Block, BlockId, BlockStyle};
use crate::content::BlockContent;
use crate::document::Document;
use crate::document_id::DocumentId;
use crate::theme::{ThemeDef, ThemePreset};

/// Current interchange schema version
pub const SCHEMA_VERSION: u32 = 1;

/// File name used for exported documents
pub const EXPORT_FILE_NAME: &str = "gift-config.json";

/// Errors that reject an imported payload
#[derive(Error, Debug)]
pub enum ImportError {
    /// Not parseable as JSON at all
    #[error("Malformed configuration: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Parseable, but not shaped like a document
    #[error("Invalid configuration: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Block {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Block {index} has an empty id")]
    EmptyBlockId { index: usize },

    #[error("Block id '{0}' appears more than once")]
    DuplicateBlockId(String),

    #[error("Block {index} has unknown type '{kind}'")]
    UnknownBlockType { index: usize, kind: String },

    #[error("Block {index} ({kind}) has invalid content: {source}")]
    InvalidContent {
        index: usize,
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Block {index} has invalid style: {source}")]
    InvalidStyle {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// How strictly to treat block types this build does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOptions {
    /// Keep unknown block types as opaque blocks instead of rejecting the file
    pub allow_unknown_types: bool,
}

impl ImportOptions {
    /// Reject unknown block types
    pub fn strict() -> Self {
        Self {
            allow_unknown_types: false,
        }
    }

    /// Keep unknown block types verbatim
    pub fn lenient() -> Self {
        Self {
            allow_unknown_types: true,
        }
    }
}

// ==================== Wire types ====================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOut<'a> {
    schema_version: u32,
    theme_key: &'a str,
    custom_theme: &'a ThemeDef,
    blocks: Vec<BlockOut<'a>>,
    document_id: &'a DocumentId,
}

#[derive(Serialize)]
struct BlockOut<'a> {
    id: &'a BlockId,
    #[serde(rename = "type")]
    kind: &'a str,
    content: Value,
    style: &'a BlockStyle,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentIn {
    #[serde(default)]
    schema_version: Option<u32>,
    #[serde(default, alias = "theme")]
    theme_key: Option<String>,
    #[serde(default)]
    custom_theme: Option<ThemeDef>,
    blocks: Vec<BlockIn>,
    #[serde(default, alias = "id")]
    document_id: Option<String>,
}

#[derive(Deserialize)]
struct BlockIn {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    style: Option<Value>,
}

// ==================== Export ====================

/// Serialize a document to the interchange format
pub fn export(doc: &Document) -> Result<String, serde_json::Error> {
    let blocks = doc
        .blocks
        .iter()
        .map(|block| {
            Ok(BlockOut {
                id: &block.id,
                kind: block.type_tag(),
                content: block.content.to_value()?,
                style: &block.style,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    let out = DocumentOut {
        schema_version: SCHEMA_VERSION,
        theme_key: &doc.theme_key,
        custom_theme: &doc.custom_theme,
        blocks,
        document_id: &doc.document_id,
    };

    serde_json::to_string_pretty(&out)
}

// ==================== Import ====================

/// Parse and validate an interchange payload
///
/// Either the whole document is returned or nothing is.
pub fn import(text: &str, options: ImportOptions) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    let wire: DocumentIn = serde_json::from_value(value).map_err(ImportError::Schema)?;

    if let Some(found) = wire.schema_version {
        if found > SCHEMA_VERSION {
            return Err(ImportError::UnsupportedVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }
    }

    let blocks = wire
        .blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| decode_block(index, block, options))
        .collect::<Result<Vec<_>, _>>()?;

    let doc = Document {
        theme_key: wire
            .theme_key
            .unwrap_or_else(|| ThemePreset::default().to_string()),
        custom_theme: wire.custom_theme.unwrap_or_default(),
        blocks,
        document_id: wire
            .document_id
            .and_then(|id| DocumentId::parse(&id).ok())
            .unwrap_or_default(),
    };

    if let Some(dup) = doc.find_duplicate_id() {
        return Err(ImportError::DuplicateBlockId(dup.to_string()));
    }

    Ok(doc)
}

fn decode_block(index: usize, wire: BlockIn, options: ImportOptions) -> Result<Block, ImportError> {
    let id = wire.id.ok_or(ImportError::MissingField {
        index,
        field: "id",
    })?;
    if id.trim().is_empty() {
        return Err(ImportError::EmptyBlockId { index });
    }
    let kind = wire.kind.ok_or(ImportError::MissingField {
        index,
        field: "type",
    })?;
    let content = wire.content.ok_or(ImportError::MissingField {
        index,
        field: "content",
    })?;
    let style = wire.style.ok_or(ImportError::MissingField {
        index,
        field: "style",
    })?;

    let content = match BlockContent::from_tagged_value(&kind, content) {
        Ok(content) => content,
        Err(source) => {
            return Err(ImportError::InvalidContent {
                index,
                kind,
                source,
            })
        }
    };

    if content.kind().is_none() && !options.allow_unknown_types {
        return Err(ImportError::UnknownBlockType { index, kind });
    }

    let style: BlockStyle = serde_json::from_value(style)
        .map_err(|source| ImportError::InvalidStyle { index, source })?;

    Ok(Block {
        id: BlockId::from(id),
        content,
        style,
    })
}
