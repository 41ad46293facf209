//! The folding rule that turns an event log into a snapshot.
//!
//! Events are applied strictly in arrival order. Per id the state machine is:
//!
//! ```text
//! absent --created--> active --created/updated--> active
//!    |                   |
//!    +------deleted------+--deleted--> tombstoned (terminal)
//! ```
//!
//! `updated` never leaves `absent`, and nothing leaves `tombstoned`.
//! Timestamps are carried along as payload but never consulted.

use std::collections::{BTreeSet, HashMap};

use reconcile_types::{EntityId, Event, EventKind, Item};

use crate::snapshot::Snapshot;

/// Why an event had no effect on the fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The id was deleted earlier in the log.
    Tombstoned,
    /// An update arrived for an id with no accepted create.
    NotActive,
    /// The event's type tag is missing or not a lifecycle kind.
    Unrecognized,
}

impl core::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reason = match self {
            Self::Tombstoned => "tombstoned",
            Self::NotActive => "not_active",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(reason)
    }
}

/// What applying a single event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// First create for the id; it now holds a position in the output order.
    Activated,
    /// Create for an already-active id; the item was replaced in place.
    Replaced,
    /// Update merged into an active item.
    Merged,
    /// The id is now tombstoned.
    Tombstoned {
        /// Whether an active item was removed.
        was_active: bool,
    },
    /// The event changed nothing.
    Ignored(IgnoreReason),
}

/// In-progress fold state.
///
/// Items live in activation-order slots. A deleted id's slot is emptied and
/// never reused, since a tombstoned id cannot be activated again.
#[derive(Debug, Default)]
pub struct Fold {
    slots: Vec<Option<Item>>,
    index: HashMap<EntityId, usize>,
    tombstoned: BTreeSet<EntityId>,
}

impl Fold {
    /// Start an empty fold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a whole log, left to right.
    pub fn run<'a>(events: impl IntoIterator<Item = &'a Event>) -> Snapshot {
        let mut fold = Self::new();
        let mut seen: usize = 0;
        for event in events {
            fold.apply(event);
            seen = seen.saturating_add(1);
        }
        let snapshot = fold.finish();
        tracing::debug!(
            events = seen,
            active = snapshot.len(),
            tombstoned = snapshot.tombstoned().len(),
            "Folded event log"
        );
        snapshot
    }

    /// Apply one event.
    pub fn apply(&mut self, event: &Event) -> Applied {
        let applied = self.step(event);
        if let Applied::Ignored(reason) = applied {
            tracing::trace!(
                id = %event.id,
                kind = %event.kind,
                %reason,
                "Event had no effect"
            );
        }
        applied
    }

    fn step(&mut self, event: &Event) -> Applied {
        if self.tombstoned.contains(&event.id) {
            return Applied::Ignored(IgnoreReason::Tombstoned);
        }

        match event.kind {
            EventKind::Created => self.create(event),
            EventKind::Updated => self.update(event),
            EventKind::Deleted => self.delete(&event.id),
            EventKind::Unrecognized(_) | EventKind::Absent => {
                Applied::Ignored(IgnoreReason::Unrecognized)
            }
        }
    }

    fn create(&mut self, event: &Event) -> Applied {
        if let Some(slot) = self.active_slot(&event.id) {
            *slot = Some(Item::from(event));
            return Applied::Replaced;
        }

        self.index.insert(event.id.clone(), self.slots.len());
        self.slots.push(Some(Item::from(event)));
        Applied::Activated
    }

    fn update(&mut self, event: &Event) -> Applied {
        match self.active_slot(&event.id).and_then(Option::as_mut) {
            Some(item) => {
                item.merge(event);
                Applied::Merged
            }
            None => Applied::Ignored(IgnoreReason::NotActive),
        }
    }

    fn delete(&mut self, id: &EntityId) -> Applied {
        let was_active = self
            .index
            .remove(id)
            .and_then(|position| self.slots.get_mut(position))
            .and_then(Option::take)
            .is_some();
        self.tombstoned.insert(id.clone());
        Applied::Tombstoned { was_active }
    }

    fn active_slot(&mut self, id: &EntityId) -> Option<&mut Option<Item>> {
        let position = *self.index.get(id)?;
        self.slots.get_mut(position)
    }

    /// Whether `id` currently has an active item.
    pub fn is_active(&self, id: impl Into<EntityId>) -> bool {
        self.index.contains_key(&id.into())
    }

    /// Whether `id` has been deleted at any point so far.
    pub fn is_tombstoned(&self, id: impl Into<EntityId>) -> bool {
        self.tombstoned.contains(&id.into())
    }

    /// Finish the fold, returning active items in activation order.
    pub fn finish(self) -> Snapshot {
        let items = self.slots.into_iter().flatten().collect();
        Snapshot::new(items, self.tombstoned)
    }
}

/// Fold a batch of events without keeping a reconciler around.
pub fn process_events(events: &[Event]) -> Vec<Item> {
    Fold::run(events).into_items()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn create_activates_then_replaces() {
        let mut fold = Fold::new();
        assert_eq!(fold.apply(&Event::created("a", 100)), Applied::Activated);
        assert_eq!(fold.apply(&Event::created("a", 100)), Applied::Replaced);
        assert!(fold.is_active("a"));
    }

    #[test]
    fn replacing_create_discards_merged_fields() {
        let events = [
            Event::created("a", 1).with_field("color", "red"),
            Event::updated("a", 2).with_field("size", 3),
            Event::created("a", 3).with_field("color", "blue"),
        ];
        let items = process_events(&events);

        assert_eq!(items.len(), 1);
        let item = items.first();
        assert_eq!(item.and_then(|i| i.field("color")), Some(&json!("blue")));
        assert_eq!(item.and_then(|i| i.field("size")), None);
        assert_eq!(item.map(|i| &i.kind), Some(&EventKind::Created));
    }

    #[test]
    fn replacing_create_keeps_position() {
        let events = [
            Event::created("a", 1),
            Event::created("b", 2),
            Event::created("a", 3),
        ];
        assert_eq!(ids(&process_events(&events)), ["a", "b"]);
    }

    #[test]
    fn update_before_create_is_ignored() {
        let mut fold = Fold::new();
        assert_eq!(
            fold.apply(&Event::updated("y", 300)),
            Applied::Ignored(IgnoreReason::NotActive)
        );
        assert_eq!(fold.apply(&Event::created("y", 100)), Applied::Activated);

        let snapshot = fold.finish();
        assert_eq!(
            snapshot.get("y").and_then(|item| item.timestamp.clone()),
            Some(100.into())
        );
    }

    #[test]
    fn delete_reports_whether_item_existed() {
        let mut fold = Fold::new();
        assert_eq!(
            fold.apply(&Event::deleted("w", 200)),
            Applied::Tombstoned { was_active: false }
        );

        fold.apply(&Event::created("v", 1));
        assert_eq!(
            fold.apply(&Event::deleted("v", 2)),
            Applied::Tombstoned { was_active: true }
        );
        assert!(!fold.is_active("v"));
        assert!(fold.is_tombstoned("v"));
    }

    #[test]
    fn tombstone_blocks_every_kind() {
        let mut fold = Fold::new();
        fold.apply(&Event::deleted("x", 200));

        for event in [
            Event::created("x", 50),
            Event::updated("x", 300),
            Event::deleted("x", 400),
            Event::new("x", 500, EventKind::from("archived")),
        ] {
            assert_eq!(
                fold.apply(&event),
                Applied::Ignored(IgnoreReason::Tombstoned)
            );
        }
        assert!(fold.finish().is_empty());
    }

    #[test]
    fn unrecognized_kind_is_noop() {
        let mut fold = Fold::new();
        fold.apply(&Event::created("a", 1).with_field("color", "red"));
        assert_eq!(
            fold.apply(&Event::new("a", 2, EventKind::from("archived")).with_field("color", "blue")),
            Applied::Ignored(IgnoreReason::Unrecognized)
        );

        let snapshot = fold.finish();
        assert_eq!(
            snapshot.get("a").and_then(|item| item.field("color")),
            Some(&json!("red"))
        );
    }

    #[test]
    fn untyped_event_is_noop() {
        let mut fold = Fold::new();
        fold.apply(&Event::created(7_i64, 1));

        let mut untyped = Event::updated(7_i64, 2).with_field("color", "blue");
        untyped.kind = EventKind::Absent;
        assert_eq!(
            fold.apply(&untyped),
            Applied::Ignored(IgnoreReason::Unrecognized)
        );
        assert!(fold.is_active(7_i64));
        assert!(!fold.is_active("7"));
    }

    #[test]
    fn deleted_slot_is_skipped_in_output() {
        let events = [
            Event::created("a", 1),
            Event::created("b", 2),
            Event::created("c", 3),
            Event::deleted("b", 4),
        ];
        let snapshot = Fold::run(&events);
        assert_eq!(ids(snapshot.items()), ["a", "c"]);
        assert!(snapshot.is_tombstoned("b"));
    }
}
