//! Dirty menu tracking

use std::collections::BTreeSet;

use shared::models::MenuId;

/// Menus with edits not yet written back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    dirty: BTreeSet<MenuId>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<MenuId>,
    {
        self.dirty.extend(ids.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.dirty.clear();
    }

    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.dirty.contains(id)
    }

    /// Dirty ids in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &MenuId> {
        self.dirty.iter()
    }
}
