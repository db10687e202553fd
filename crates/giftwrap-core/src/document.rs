//! The gift document
//!
//! A [`Document`] is the unit that gets persisted, exported and imported:
//! the theme selection, the inline custom theme, the ordered blocks and the
//! document id. Order of `blocks` is the render order.

use crate::block::{Block, BlockId};
use crate::document_id::DocumentId;
use crate::theme::{self, ThemeDef, ThemePreset};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Preset name or `custom`
    pub theme_key: String,
    /// Authoritative theme when `theme_key` is `custom`
    pub custom_theme: ThemeDef,
    pub blocks: Vec<Block>,
    pub document_id: DocumentId,
}

impl Default for Document {
    /// An empty document on the `modern` preset with a fresh id
    fn default() -> Self {
        Self {
            theme_key: ThemePreset::Modern.to_string(),
            custom_theme: ThemePreset::Modern.theme(),
            blocks: Vec::new(),
            document_id: DocumentId::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The theme the document renders with
    pub fn theme(&self) -> ThemeDef {
        theme::resolve(&self.theme_key, &self.custom_theme)
    }

    /// Position of a block in render order
    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.index_of(id).is_some()
    }

    /// Ids in render order
    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    /// Find the first duplicated block id, if any
    pub fn find_duplicate_id(&self) -> Option<&BlockId> {
        let mut seen = std::collections::HashSet::new();
        self.blocks
            .iter()
            .map(|b| &b.id)
            .find(|id| !seen.insert(*id))
    }

    /// Resolve a block id from its full value or an unambiguous prefix
    pub fn resolve_id(&self, query: &str) -> Option<BlockId> {
        if let Some(block) = self.blocks.iter().find(|b| b.id.as_str() == query) {
            return Some(block.id.clone());
        }

        let mut matches = self.blocks.iter().filter(|b| b.id.matches_prefix(query));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id.clone()),
            _ => None,
        }
    }
}
