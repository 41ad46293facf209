//! The result of folding an event log.

use std::collections::BTreeSet;

use reconcile_types::{EntityId, Item};

/// Active items in activation order, plus every id deleted so far.
///
/// Only a fold produces a snapshot. The items are owned copies, so changing
/// them never reaches back into the reconciler that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    items: Vec<Item>,
    tombstoned: BTreeSet<EntityId>,
}

impl Snapshot {
    pub(crate) const fn new(items: Vec<Item>, tombstoned: BTreeSet<EntityId>) -> Self {
        Self { items, tombstoned }
    }

    /// Active items, ordered by each id's first accepted create.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume the snapshot, keeping only the active items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Ids that received a `deleted` event.
    pub const fn tombstoned(&self) -> &BTreeSet<EntityId> {
        &self.tombstoned
    }

    /// Find the active item for `id`.
    pub fn get(&self, id: impl Into<EntityId>) -> Option<&Item> {
        let id = id.into();
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether `id` has an active item.
    pub fn is_active(&self, id: impl Into<EntityId>) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` was deleted. Always excludes it from [`Snapshot::items`].
    pub fn is_tombstoned(&self, id: impl Into<EntityId>) -> bool {
        self.tombstoned.contains(&id.into())
    }

    /// Number of active items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no active items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Snapshot {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
