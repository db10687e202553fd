//! Block selection for bulk actions
//!
//! The selection is an insertion-ordered set of block ids. It does not know
//! about the document on its own; [`crate::store::BlockStore`] keeps it a
//! subset of the document's ids by pruning it on every removal.

use serde::{Deserialize, Serialize};

use crate::block::BlockId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<BlockId>", into = "Vec<BlockId>")]
pub struct Selection {
    ids: Vec<BlockId>,
}

impl From<Vec<BlockId>> for Selection {
    /// Build a selection from a list, dropping repeated ids
    fn from(ids: Vec<BlockId>) -> Self {
        let mut selection = Self::new();
        selection.set(ids);
        selection
    }
}

impl From<Selection> for Vec<BlockId> {
    fn from(selection: Selection) -> Self {
        selection.ids
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present
    ///
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &BlockId) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    /// Select every id in `all`, or clear if everything is already selected
    ///
    /// The comparison is by count, so a selection as large as the document
    /// is treated as "everything".
    pub fn select_all(&mut self, all: &[BlockId]) {
        if self.ids.len() == all.len() {
            self.ids.clear();
        } else {
            self.ids = all.to_vec();
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection wholesale
    pub fn set(&mut self, ids: Vec<BlockId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Drop ids the predicate rejects
    pub fn retain(&mut self, mut keep: impl FnMut(&BlockId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    /// Remove a single id; returns whether it was selected
    pub fn remove(&mut self, id: &BlockId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in the order they were selected
    pub fn ids(&self) -> &[BlockId] {
        &self.ids
    }
}
