//! The block store
//!
//! `BlockStore` owns the document and the bulk-action selection. Every
//! structural change goes through it and is written through to the
//! persistence adapter before the call returns.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = BlockStore::open_with_config(&config)?;
//!
//! let hero = store.add_block("hero");
//! store.duplicate_block(&hero);
//! store.move_block(1, Direction::Up);
//!
//! if let Some(discarded) = store.take_load_warning() {
//!     eprintln!("started over: {}", discarded);
//! }
//! if let Some(warning) = store.take_save_warning() {
//!     eprintln!("not saved: {}", warning);
//! }
//! ```
//!
//! Mutations never fail. Ids that no longer exist are ignored, and a failed
//! save leaves the in-memory change in place and records a warning.

use anyhow::{Context, Result};
use thiserror::Error;

use crate::block::{Block, BlockId, BlockStyle};
use crate::codec::{self, ImportError, ImportOptions};
use crate::config::Config;
use crate::content::BlockContent;
use crate::document::Document;
use crate::selection::Selection;
use crate::storage::{
    FilePersistence, MemoryPersistence, Persistence, StorageError, StorageResult, DOCUMENT_KEY,
    SELECTION_KEY,
};
use crate::theme::{self, ThemeDef};

/// Direction for [`BlockStore::move_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the document (-1)
    Up,
    /// Towards the end of the document (+1)
    Down,
}

impl Direction {
    /// Index offset for this direction
    pub fn delta(&self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = i32;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            other => Err(other),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown font '{0}'")]
pub struct UnknownFont(pub String);

/// A saved document that did not decode and was replaced at startup
#[derive(Error, Debug)]
#[error("Saved gift document could not be read, started a new one ({reason})")]
pub struct DiscardedDocument {
    pub reason: ImportError,
    /// Key the unreadable text was copied to, if the copy succeeded
    pub backup_key: Option<String>,
}

pub struct BlockStore {
    doc: Document,
    selection: Selection,
    persistence: Box<dyn Persistence>,
    import_options: ImportOptions,
    save_warning: Option<StorageError>,
    load_warning: Option<DiscardedDocument>,
}

impl BlockStore {
    /// Open a store backed by `persistence`
    ///
    /// A missing document starts a fresh default one. A document that does
    /// not decode is backed up next to the original and replaced by the
    /// default. Only I/O errors while reading are returned.
    pub fn open(
        persistence: Box<dyn Persistence>,
        import_options: ImportOptions,
    ) -> StorageResult<Self> {
        let mut persistence = persistence;
        let (doc, load_warning) = load_document(persistence.as_mut())?;
        let selection = load_selection(persistence.as_ref(), &doc)?;

        Ok(Self {
            doc,
            selection,
            persistence,
            import_options,
            save_warning: None,
            load_warning,
        })
    }

    /// Open the file-backed store in the configured data directory
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let persistence = FilePersistence::from_config(config);
        let dir = persistence.dir().to_path_buf();
        Self::open(Box::new(persistence), config.import_options())
            .with_context(|| format!("Failed to open gift document in {:?}", dir))
    }

    /// A store that keeps everything in memory
    pub fn in_memory() -> Self {
        Self {
            doc: Document::default(),
            selection: Selection::new(),
            persistence: Box::new(MemoryPersistence::new()),
            import_options: ImportOptions::default(),
            save_warning: None,
            load_warning: None,
        }
    }

    // ==================== Accessors ====================

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Blocks in render order
    pub fn blocks(&self) -> &[Block] {
        &self.doc.blocks
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.doc.get(id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.doc.index_of(id)
    }

    pub fn len(&self) -> usize {
        self.doc.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.blocks.is_empty()
    }

    /// The resolved theme the document renders with
    pub fn theme(&self) -> ThemeDef {
        self.doc.theme()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Take the error from the most recent failed save, if any
    pub fn take_save_warning(&mut self) -> Option<StorageError> {
        self.save_warning.take()
    }

    /// Take the notice that the saved document was replaced on open, if it was
    pub fn take_load_warning(&mut self) -> Option<DiscardedDocument> {
        self.load_warning.take()
    }

    // ==================== Block mutations ====================

    /// Append a block of the given type with its default content
    pub fn add_block(&mut self, tag: &str) -> BlockId {
        let block = Block::new(tag);
        let id = block.id.clone();
        if block.kind().is_none() {
            tracing::debug!("Adding block of unrecognized type {:?}", tag);
        }
        self.doc.blocks.push(block);
        self.persist();
        id
    }

    /// Replace a block's content
    ///
    /// The content must be of the block's own type. Returns whether the
    /// block was found and updated.
    pub fn update_content(&mut self, id: &BlockId, content: BlockContent) -> bool {
        let Some(block) = self.doc.get_mut(id) else {
            tracing::debug!("Ignoring content update for missing block {}", id);
            return false;
        };

        if block.type_tag() != content.type_tag() {
            tracing::debug!(
                "Ignoring {} content for {} block {}",
                content.type_tag(),
                block.type_tag(),
                id
            );
            return false;
        }

        block.content = content;
        self.persist();
        true
    }

    /// Replace a block's style; returns whether the block was found
    pub fn update_style(&mut self, id: &BlockId, style: BlockStyle) -> bool {
        let Some(block) = self.doc.get_mut(id) else {
            tracing::debug!("Ignoring style update for missing block {}", id);
            return false;
        };

        block.style = style;
        self.persist();
        true
    }

    /// Swap the block at `index` with its neighbour
    ///
    /// Does nothing when the neighbour would fall outside the document.
    /// Returns whether anything moved.
    pub fn move_block(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.doc.blocks.len();
        let Some(target) = index.checked_add_signed(direction.delta()) else {
            return false;
        };
        if index >= len || target >= len {
            return false;
        }

        self.doc.blocks.swap(index, target);
        self.persist();
        true
    }

    /// Insert a deep copy of a block right after it
    ///
    /// Returns the id of the copy, or `None` if `id` was not found.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let Some(index) = self.doc.index_of(id) else {
            tracing::debug!("Ignoring duplicate of missing block {}", id);
            return None;
        };

        let copy = self.doc.blocks[index].duplicate_as(self.fresh_id());
        let new_id = copy.id.clone();
        self.doc.blocks.insert(index + 1, copy);
        self.persist();
        Some(new_id)
    }

    /// Remove a block and drop it from the selection
    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let Some(index) = self.doc.index_of(id) else {
            tracing::debug!("Ignoring removal of missing block {}", id);
            return false;
        };

        self.doc.blocks.remove(index);
        self.selection.remove(id);
        self.persist();
        true
    }

    /// Remove every block
    pub fn clear_blocks(&mut self) {
        self.doc.blocks.clear();
        self.selection.clear();
        self.persist();
    }

    // ==================== Bulk mutations ====================

    /// Duplicate every block whose id is in `ids`
    ///
    /// The copies keep their document order and are inserted as one batch
    /// after the highest-positioned source block. The selection becomes
    /// the copies. Returns the new ids.
    pub fn bulk_duplicate(&mut self, ids: &[BlockId]) -> Vec<BlockId> {
        let Some(last_index) = ids.iter().filter_map(|id| self.doc.index_of(id)).max() else {
            tracing::debug!("Bulk duplicate matched no blocks");
            return Vec::new();
        };

        let sources: Vec<Block> = self
            .doc
            .blocks
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect();

        let copies: Vec<Block> = sources
            .iter()
            .map(|b| b.duplicate_as(self.fresh_id()))
            .collect();
        let new_ids: Vec<BlockId> = copies.iter().map(|b| b.id.clone()).collect();

        let at = last_index + 1;
        self.doc.blocks.splice(at..at, copies);
        self.selection.set(new_ids.clone());
        self.persist();
        new_ids
    }

    /// Remove every block whose id is in `ids` and clear the selection
    ///
    /// Returns how many blocks were removed.
    pub fn bulk_delete(&mut self, ids: &[BlockId]) -> usize {
        let before = self.doc.blocks.len();
        self.doc.blocks.retain(|b| !ids.contains(&b.id));
        let removed = before - self.doc.blocks.len();

        if removed == 0 && self.selection.is_empty() {
            return 0;
        }

        self.selection.clear();
        self.persist();
        removed
    }

    /// [`bulk_duplicate`](Self::bulk_duplicate) on the current selection
    pub fn duplicate_selected(&mut self) -> Vec<BlockId> {
        let ids = self.selection.ids().to_vec();
        self.bulk_duplicate(&ids)
    }

    /// [`bulk_delete`](Self::bulk_delete) on the current selection
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return 0;
        }
        self.bulk_delete(&ids)
    }

    // ==================== Selection ====================

    /// Toggle selection of a block; ids not in the document are ignored
    ///
    /// Returns whether the block is selected afterwards.
    pub fn toggle_selection(&mut self, id: &BlockId) -> bool {
        if !self.doc.contains(id) {
            tracing::debug!("Ignoring selection of missing block {}", id);
            return false;
        }

        let selected = self.selection.toggle(id);
        self.persist();
        selected
    }

    /// Select every block, or clear the selection if all are selected
    pub fn select_all(&mut self) {
        let all = self.doc.block_ids();
        self.selection.select_all(&all);
        self.persist();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.persist();
    }

    // ==================== Theme ====================

    /// Select a preset by key, or `custom` for the inline theme
    pub fn set_theme(&mut self, theme_key: &str) {
        if !theme::is_known_key(theme_key) {
            tracing::debug!("Selecting unknown theme key {:?}", theme_key);
        }
        self.doc.theme_key = theme_key.to_string();
        self.persist();
    }

    /// Replace the inline custom theme
    pub fn set_custom_theme(&mut self, custom: ThemeDef) {
        self.doc.custom_theme = custom;
        self.persist();
    }

    pub fn set_custom_primary(&mut self, color: &str) {
        self.doc.custom_theme.set_primary(color);
        self.persist();
    }

    pub fn set_custom_background(&mut self, background: &str) {
        self.doc.custom_theme.background = background.to_string();
        self.persist();
    }

    /// Set the custom theme's font to one of [`theme::FONTS`]
    pub fn set_custom_font(&mut self, font: &str) -> std::result::Result<(), UnknownFont> {
        if !theme::is_known_font(font) {
            return Err(UnknownFont(font.to_string()));
        }
        self.doc.custom_theme.font = font.to_string();
        self.persist();
        Ok(())
    }

    /// Set the custom theme's particles from a space separated list
    pub fn set_custom_particles(&mut self, glyphs: &str) {
        self.doc.custom_theme.set_particles_from_str(glyphs);
        self.persist();
    }

    // ==================== Whole document ====================

    /// Start over with a fresh default document
    pub fn reset(&mut self) {
        self.doc = Document::default();
        self.selection.clear();
        tracing::info!("Started new document {}", self.doc.document_id);
        self.persist();
    }

    /// Serialize the document to the interchange format
    pub fn export(&self) -> std::result::Result<String, serde_json::Error> {
        codec::export(&self.doc)
    }

    /// Replace the document with an imported one
    ///
    /// On error the current document is left untouched.
    pub fn import(&mut self, text: &str) -> std::result::Result<(), ImportError> {
        let doc = codec::import(text, self.import_options)?;
        tracing::info!(
            "Imported document {} with {} blocks",
            doc.document_id,
            doc.blocks.len()
        );
        self.doc = doc;
        self.selection.clear();
        self.persist();
        Ok(())
    }

    // ==================== Internals ====================

    /// A block id not used by any block in the document
    fn fresh_id(&self) -> BlockId {
        loop {
            let id = BlockId::generate();
            if !self.doc.contains(&id) {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.write_through() {
            tracing::warn!("Failed to save gift document: {}", e);
            self.save_warning = Some(e);
        }
    }

    fn write_through(&mut self) -> StorageResult<()> {
        let doc_text = codec::export(&self.doc)?;
        self.persistence.save(DOCUMENT_KEY, &doc_text)?;

        let selection_text = serde_json::to_string(&self.selection)?;
        self.persistence.save(SELECTION_KEY, &selection_text)
    }
}

fn load_document(
    persistence: &mut dyn Persistence,
) -> StorageResult<(Document, Option<DiscardedDocument>)> {
    let Some(text) = persistence.load(DOCUMENT_KEY)? else {
        tracing::debug!("No saved document, starting fresh");
        return Ok((Document::default(), None));
    };

    // Saved documents may hold blocks from a newer build; keep them
    match codec::import(&text, ImportOptions::lenient()) {
        Ok(doc) => {
            tracing::debug!("Loaded document with {} blocks", doc.blocks.len());
            Ok((doc, None))
        }
        Err(e) => {
            tracing::warn!("Saved document could not be read ({}), starting fresh", e);
            let backup_key = match persistence.backup_corrupt(DOCUMENT_KEY) {
                Ok(Some(backup)) => {
                    tracing::warn!("Previous document kept as {}", backup);
                    Some(backup)
                }
                Ok(None) => None,
                Err(backup_err) => {
                    tracing::warn!("Could not back up unreadable document: {}", backup_err);
                    None
                }
            };
            let discarded = DiscardedDocument {
                reason: e,
                backup_key,
            };
            Ok((Document::default(), Some(discarded)))
        }
    }
}

fn load_selection(persistence: &dyn Persistence, doc: &Document) -> StorageResult<Selection> {
    let Some(text) = persistence.load(SELECTION_KEY)? else {
        return Ok(Selection::new());
    };

    let mut selection: Selection = match serde_json::from_str(&text) {
        Ok(selection) => selection,
        Err(e) => {
            tracing::debug!("Discarding unreadable selection: {}", e);
            return Ok(Selection::new());
        }
    };
    selection.retain(|id| doc.contains(id));
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Align, Background, Padding, Width};
    use crate::content::{BlockKind, HeroContent, NoteContent};
    use crate::storage::CORRUPT_BACKUP_SUFFIX;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    /// Memory persistence whose contents stay visible to the test
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<MemoryPersistence>>);

    impl Persistence for Shared {
        fn load(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.borrow().load(key)
        }

        fn save(&mut self, key: &str, text: &str) -> StorageResult<()> {
            self.0.borrow_mut().save(key, text)
        }
    }

    /// Persistence that refuses every write
    struct ReadOnly;

    impl Persistence for ReadOnly {
        fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, key: &str, _text: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable(format!("{} is read-only", key)))
        }
    }

    fn store_with(ids: &[&str]) -> BlockStore {
        let mut store = BlockStore::in_memory();
        for _ in ids {
            store.add_block("note");
        }
        for (block, name) in store.doc.blocks.iter_mut().zip(ids) {
            block.id = BlockId::from(*name);
        }
        store
    }

    fn ids_of(store: &BlockStore) -> Vec<String> {
        store.blocks().iter().map(|b| b.id.to_string()).collect()
    }

    fn assert_unique_ids(store: &BlockStore) {
        let unique: HashSet<_> = store.blocks().iter().map(|b| &b.id).collect();
        assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn test_add_hero_to_empty_document() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("hero");

        assert_eq!(store.len(), 1);
        let block = store.get(&id).unwrap();
        assert_eq!(block.kind(), Some(BlockKind::Hero));
        assert_eq!(
            block.content,
            BlockContent::Hero(HeroContent {
                title: "Celebrate!".into(),
                subtitle: "This is for you.".into(),
            })
        );
        assert_eq!(block.style.background, Background::Transparent);
        assert_eq!(block.style.align, Align::Center);
        assert_eq!(block.style.padding, Padding::Normal);
        assert_eq!(block.style.width, Width::Full);
    }

    #[test]
    fn test_add_unknown_type_is_permissive() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("hologram");
        let block = store.get(&id).unwrap();
        assert_eq!(block.type_tag(), "hologram");
        assert!(block.kind().is_none());
    }

    #[test]
    fn test_update_content_replaces_record() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("note");

        let content = BlockContent::Note(NoteContent {
            text: "Happy birthday".into(),
        });
        assert!(store.update_content(&id, content.clone()));
        assert_eq!(store.get(&id).unwrap().content, content);
    }

    #[test]
    fn test_update_content_of_other_type_is_ignored() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("note");
        let before = store.get(&id).unwrap().clone();

        assert!(!store.update_content(&id, BlockContent::default_for(BlockKind::Hero)));
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_updates_to_missing_block_are_noops() {
        let mut store = store_with(&["a"]);
        let before = store.document().clone();
        let ghost = BlockId::from("ghost");

        assert!(!store.update_content(&ghost, BlockContent::default_for(BlockKind::Note)));
        assert!(!store.update_style(&ghost, BlockStyle::default()));
        assert!(store.duplicate_block(&ghost).is_none());
        assert!(!store.remove_block(&ghost));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_update_style() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("note");
        let style = BlockStyle {
            background: Background::Dark,
            width: Width::Half,
            ..BlockStyle::default()
        };

        assert!(store.update_style(&id, style));
        assert_eq!(store.get(&id).unwrap().style, style);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let original = ids_of(&store);

        for i in 1..store.len() {
            assert!(store.move_block(i, Direction::Up));
            assert!(store.move_block(i - 1, Direction::Down));
            assert_eq!(ids_of(&store), original);
        }
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let mut store = store_with(&["a", "b", "c"]);

        assert!(!store.move_block(0, Direction::Up));
        assert!(!store.move_block(2, Direction::Down));
        assert!(!store.move_block(7, Direction::Up));
        assert_eq!(ids_of(&store), vec!["a", "b", "c"]);

        assert!(store.move_block(0, Direction::Down));
        assert_eq!(ids_of(&store), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_direction_from_offset() {
        assert_eq!(Direction::try_from(-1), Ok(Direction::Up));
        assert_eq!(Direction::try_from(1), Ok(Direction::Down));
        assert_eq!(Direction::try_from(2), Err(2));
    }

    #[test]
    fn test_duplicate_inserts_copy_after_source() {
        let mut store = store_with(&["a", "b", "c"]);
        let b = BlockId::from("b");

        let copy_id = store.duplicate_block(&b).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.index_of(&copy_id), Some(2));
        let source = store.get(&b).unwrap();
        let copy = store.get(&copy_id).unwrap();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.content, source.content);
        assert_eq!(copy.style, source.style);
        assert_eq!(ids_of(&store)[0], "a");
        assert_eq!(ids_of(&store)[3], "c");
    }

    #[test]
    fn test_duplicate_is_deep_copy() {
        let mut store = store_with(&["a"]);
        let a = BlockId::from("a");
        let copy_id = store.duplicate_block(&a).unwrap();

        store.update_content(
            &copy_id,
            BlockContent::Note(NoteContent {
                text: "changed".into(),
            }),
        );
        assert_ne!(
            store.get(&a).unwrap().content,
            store.get(&copy_id).unwrap().content
        );
    }

    #[test]
    fn test_remove_prunes_selection() {
        let mut store = store_with(&["a", "b"]);
        let a = BlockId::from("a");
        store.toggle_selection(&a);
        store.toggle_selection(&BlockId::from("b"));

        assert!(store.remove_block(&a));
        assert!(!store.selection().contains(&a));
        assert_eq!(store.selection().len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_across_mutations() {
        let mut store = BlockStore::in_memory();
        let mut ids = Vec::new();
        for tag in ["hero", "note", "quiz", "poll", "gallery"] {
            ids.push(store.add_block(tag));
        }

        for round in 0..20 {
            let id = ids[round % ids.len()].clone();
            match round % 4 {
                0 => {
                    if let Some(copy) = store.duplicate_block(&id) {
                        ids.push(copy);
                    }
                }
                1 => {
                    store.move_block(round % store.len(), Direction::Down);
                }
                2 => {
                    store.remove_block(&id);
                }
                _ => ids.push(store.add_block("note")),
            }
            assert_unique_ids(&store);
        }
    }

    #[test]
    fn test_toggle_ignores_missing_block() {
        let mut store = store_with(&["a"]);
        assert!(!store.toggle_selection(&BlockId::from("ghost")));
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_select_all_toggles() {
        let mut store = store_with(&["a", "b", "c"]);

        store.toggle_selection(&BlockId::from("b"));
        store.select_all();
        assert_eq!(store.selection().len(), 3);

        store.select_all();
        assert!(store.selection().is_empty());

        store.select_all();
        assert_eq!(store.selection().len(), 3);
        store.clear_selection();
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_bulk_duplicate_inserts_after_highest_selected() {
        let mut store = store_with(&["a", "b", "c"]);
        store.toggle_selection(&BlockId::from("c"));
        store.toggle_selection(&BlockId::from("a"));

        let new_ids = store.duplicate_selected();

        assert_eq!(store.len(), 5);
        let order = ids_of(&store);
        assert_eq!(&order[..3], &["a", "b", "c"]);
        // Copies follow document order, not selection order
        assert_eq!(order[3], new_ids[0].to_string());
        assert_eq!(order[4], new_ids[1].to_string());
        assert_eq!(store.selection().ids(), new_ids.as_slice());
        assert_unique_ids(&store);
    }

    #[test]
    fn test_bulk_duplicate_with_no_matches_is_noop() {
        let mut store = store_with(&["a", "b"]);
        store.toggle_selection(&BlockId::from("a"));

        assert!(store.bulk_duplicate(&[BlockId::from("ghost")]).is_empty());
        assert_eq!(store.len(), 2);
        assert_eq!(store.selection().len(), 1);
    }

    #[test]
    fn test_bulk_delete_clears_selection() {
        let mut store = store_with(&["a", "b", "c"]);
        store.toggle_selection(&BlockId::from("a"));
        store.toggle_selection(&BlockId::from("c"));

        assert_eq!(store.delete_selected(), 2);
        assert_eq!(ids_of(&store), vec!["b"]);
        assert!(store.selection().is_empty());

        assert_eq!(store.delete_selected(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_blocks() {
        let mut store = store_with(&["a", "b"]);
        store.select_all();
        store.clear_blocks();
        assert!(store.is_empty());
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_theme_mutations() {
        let mut store = BlockStore::in_memory();
        assert_eq!(store.theme().name, "Modern Minimalist");

        store.set_theme("romantic");
        assert_eq!(store.theme().primary, "#f43f5e");

        store.set_theme("custom");
        store.set_custom_primary("#123456");
        store.set_custom_background("#000000");
        store.set_custom_particles("⭐ 🌙");
        assert!(store.set_custom_font("font-serif").is_ok());

        let theme = store.theme();
        assert_eq!(theme.primary, "#123456");
        assert_eq!(theme.secondary, "#12345640");
        assert_eq!(theme.background, "#000000");
        assert_eq!(theme.particles, vec!["⭐", "🌙"]);
        assert_eq!(theme.font, "font-serif");

        assert_eq!(
            store.set_custom_font("comic-sans"),
            Err(UnknownFont("comic-sans".into()))
        );
        assert_eq!(store.theme().font, "font-serif");

        store.set_theme("neon");
        assert_eq!(store.theme().name, "Modern Minimalist");
    }

    #[test]
    fn test_reset_starts_fresh_document() {
        let mut store = store_with(&["a"]);
        store.set_theme("party");
        store.select_all();
        let old_id = store.document().document_id.clone();

        store.reset();

        assert!(store.is_empty());
        assert!(store.selection().is_empty());
        assert_eq!(store.document().theme_key, "modern");
        assert_ne!(store.document().document_id, old_id);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = BlockStore::in_memory();
        store.add_block("hero");
        let quiz = store.add_block("quiz");
        store.add_block("spacer");
        store.update_style(
            &quiz,
            BlockStyle {
                background: Background::PrimaryTint,
                align: Align::Left,
                ..BlockStyle::default()
            },
        );
        store.set_theme("custom");
        store.set_custom_primary("#abcdef");

        let exported = store.export().unwrap();
        let original = store.document().clone();

        let mut other = BlockStore::in_memory();
        other.import(&exported).unwrap();
        assert_eq!(other.document(), &original);
    }

    #[test]
    fn test_import_invalid_leaves_document_unchanged() {
        let mut store = store_with(&["a", "b"]);
        store.select_all();
        let before = store.document().clone();

        let err = store.import("not valid json").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
        assert_eq!(store.document(), &before);
        assert_eq!(store.selection().len(), 2);
    }

    #[test]
    fn test_import_clears_selection() {
        let mut source = store_with(&["x"]);
        let exported = source.export().unwrap();
        source.select_all();

        let mut store = store_with(&["a"]);
        store.select_all();
        store.import(&exported).unwrap();
        assert!(store.selection().is_empty());
        assert_eq!(ids_of(&store), vec!["x"]);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let shared = Shared::default();
        let mut store =
            BlockStore::open(Box::new(shared.clone()), ImportOptions::strict()).unwrap();

        let id = store.add_block("hero");
        let saved = shared.load(DOCUMENT_KEY).unwrap().unwrap();
        assert!(saved.contains(id.as_str()));

        store.toggle_selection(&id);
        let selection = shared.load(SELECTION_KEY).unwrap().unwrap();
        assert!(selection.contains(id.as_str()));

        store.remove_block(&id);
        let saved = shared.load(DOCUMENT_KEY).unwrap().unwrap();
        assert!(!saved.contains(id.as_str()));
    }

    #[test]
    fn test_failed_save_keeps_change_and_warns() {
        let mut store = BlockStore::open(Box::new(ReadOnly), ImportOptions::strict()).unwrap();

        let id = store.add_block("note");
        assert!(store.get(&id).is_some());

        let warning = store.take_save_warning().unwrap();
        assert!(matches!(warning, StorageError::Unavailable(_)));
        assert!(store.take_save_warning().is_none());
    }

    #[test]
    fn test_reopen_loads_document_and_selection() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let mut store = BlockStore::open_with_config(&config).unwrap();
        let hero = store.add_block("hero");
        let note = store.add_block("note");
        store.add_block("hologram");
        store.toggle_selection(&note);
        store.toggle_selection(&hero);
        let doc = store.document().clone();
        drop(store);

        let store = BlockStore::open_with_config(&config).unwrap();
        assert_eq!(store.document(), &doc);
        assert_eq!(store.selection().ids(), &[note, hero]);
    }

    #[test]
    fn test_reopen_prunes_stale_selection() {
        let mut persistence = MemoryPersistence::new();
        let mut doc = Document::default();
        doc.blocks.push(Block::with_id(
            BlockId::from("a"),
            BlockContent::default_for(BlockKind::Note),
        ));
        persistence
            .save(DOCUMENT_KEY, &codec::export(&doc).unwrap())
            .unwrap();
        persistence.save(SELECTION_KEY, r#"["a", "gone"]"#).unwrap();

        let store = BlockStore::open(Box::new(persistence), ImportOptions::strict()).unwrap();
        assert_eq!(store.selection().ids(), &[BlockId::from("a")]);
    }

    #[test]
    fn test_corrupt_document_is_backed_up_and_replaced() {
        let shared = Shared::default();
        shared.0.borrow_mut().save(DOCUMENT_KEY, "{ nope").unwrap();

        let mut store =
            BlockStore::open(Box::new(shared.clone()), ImportOptions::strict()).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.document().theme_key, "modern");
        let backup_key = format!("{}{}", DOCUMENT_KEY, CORRUPT_BACKUP_SUFFIX);
        assert_eq!(shared.0.borrow().get(&backup_key), Some("{ nope"));

        let discarded = store.take_load_warning().unwrap();
        assert!(matches!(discarded.reason, ImportError::Malformed(_)));
        assert_eq!(discarded.backup_key.as_deref(), Some(backup_key.as_str()));
        assert!(store.take_load_warning().is_none());
        assert!(store.take_save_warning().is_none());
    }

    #[test]
    fn test_readable_document_has_no_load_warning() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let mut store = BlockStore::open_with_config(&config).unwrap();
        store.add_block("hero");
        assert!(store.take_load_warning().is_none());
        drop(store);

        let mut store = BlockStore::open_with_config(&config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.take_load_warning().is_none());
    }

    #[test]
    fn test_reopen_with_repeated_selection_ids() {
        let mut persistence = MemoryPersistence::new();
        let mut doc = Document::default();
        for name in ["a", "b"] {
            doc.blocks.push(Block::with_id(
                BlockId::from(name),
                BlockContent::default_for(BlockKind::Note),
            ));
        }
        persistence
            .save(DOCUMENT_KEY, &codec::export(&doc).unwrap())
            .unwrap();
        persistence.save(SELECTION_KEY, r#"["a", "a"]"#).unwrap();

        let mut store = BlockStore::open(Box::new(persistence), ImportOptions::strict()).unwrap();
        assert_eq!(store.selection().ids(), &[BlockId::from("a")]);

        store.select_all();
        assert_eq!(
            store.selection().ids(),
            &[BlockId::from("a"), BlockId::from("b")]
        );
    }

    #[test]
    fn test_open_missing_document_starts_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = BlockStore::open_with_config(&test_config(&temp_dir)).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.document().theme_key, "modern");
        assert!(store.selection().is_empty());
    }
}
