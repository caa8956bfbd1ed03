//! In-memory file index
//!
//! Maps employee ids to record body offsets while preserving the order the
//! ids appear in the file's header. The set of entries is fixed for the
//! store's lifetime — no insert or delete after load.

use std::collections::HashMap;

use crate::error::{Result, RosterError};

/// Insertion-ordered id → offset mapping: a hash map for O(1) lookup plus
/// a parallel vector carrying file order for listing
#[derive(Debug, Default)]
pub(crate) struct FileIndex {
    offsets: HashMap<i32, u64>,
    order: Vec<i32>,
}

impl FileIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            offsets: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Register an id at an offset; a repeated id means the header is
    /// corrupt (no well-defined offset for it)
    pub(crate) fn insert(&mut self, id: i32, offset: u64) -> Result<()> {
        if self.offsets.insert(id, offset).is_some() {
            return Err(RosterError::Format(format!(
                "duplicate id {} in index",
                id
            )));
        }
        self.order.push(id);
        Ok(())
    }

    pub(crate) fn offset(&self, id: i32) -> Option<u64> {
        self.offsets.get(&id).copied()
    }

    /// Ids in file order
    pub(crate) fn ids(&self) -> &[i32] {
        &self.order
    }

    /// (id, offset) at a position in file order
    pub(crate) fn entry_at(&self, pos: usize) -> Option<(i32, u64)> {
        let id = *self.order.get(pos)?;
        let offset = self.offsets.get(&id).copied()?;
        Some((id, offset))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
