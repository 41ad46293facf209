//! The reconciler: an append-only log of lifecycle events.
//!
//! The [`EventReconciler`] stores every event it is given, in arrival order,
//! and derives the active-entity view on demand by folding that log.
//!
//! # Design
//!
//! - **Append-only**: events are never modified or removed, short of a full
//!   [`reset`](EventReconciler::reset).
//! - **Derived state**: items and tombstones exist only as fold output.
//! - **Arrival order wins**: the `timestamp` payload is never consulted.

use reconcile_types::{Event, Item};

use crate::fold::Fold;
use crate::snapshot::Snapshot;

/// Reconciles lifecycle events into the set of currently active entities.
///
/// Adding an event is O(1) and never fails, whatever its type tag. Reading
/// the active items replays the whole log, which is O(n) in its length.
#[derive(Debug, Clone, Default)]
pub struct EventReconciler {
    /// All events, in arrival order.
    events: Vec<Event>,
}

impl EventReconciler {
    /// Create a reconciler with an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append `event` to the log verbatim.
    ///
    /// Events with an unrecognized type are stored too; they are no-ops when
    /// the log is folded.
    pub fn add_event(&mut self, event: Event) {
        tracing::trace!(
            id = %event.id,
            kind = %event.kind,
            position = self.events.len(),
            "Event appended"
        );
        self.events.push(event);
    }

    /// Current active items, in the order each was first created.
    pub fn active_items(&self) -> Vec<Item> {
        self.snapshot().into_items()
    }

    /// Fold the log into a full [`Snapshot`], tombstones included.
    pub fn snapshot(&self) -> Snapshot {
        Fold::run(&self.events)
    }

    /// Discard the whole log, tombstones included.
    pub fn reset(&mut self) {
        tracing::debug!(discarded = self.events.len(), "Reconciler reset");
        self.events.clear();
    }

    /// The log, in arrival order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events received since the last reset.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been received since the last reset.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<Event> for EventReconciler {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, events: T) {
        for event in events {
            self.add_event(event);
        }
    }
}

impl FromIterator<Event> for EventReconciler {
    fn from_iter<T: IntoIterator<Item = Event>>(events: T) -> Self {
        let mut reconciler = Self::new();
        reconciler.extend(events);
        reconciler
    }
}

#[cfg(test)]
mod tests {
    use reconcile_types::EventKind;
    use serde_json::json;

    use super::*;

    fn ids(items: &[Item]) -> Vec<String> {
        items.iter().map(|item| item.id.to_string()).collect()
    }

    #[test]
    fn new_reconciler_is_empty() {
        let reconciler = EventReconciler::new();
        assert!(reconciler.is_empty());
        assert_eq!(reconciler.len(), 0);
        assert!(reconciler.active_items().is_empty());
    }

    #[test]
    fn add_event_appends_without_folding() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::updated("a", 1));
        reconciler.add_event(Event::created("a", 2));

        assert_eq!(reconciler.len(), 2);
        assert_eq!(reconciler.events().first(), Some(&Event::updated("a", 1)));
    }

    #[test]
    fn unrecognized_events_are_logged() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::new("a", 1, EventKind::from("archived")));

        assert_eq!(reconciler.len(), 1);
        assert!(reconciler.active_items().is_empty());
    }

    #[test]
    fn streaming_matches_batch() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::created("a", 100));
        reconciler.add_event(Event::updated("a", 150));
        reconciler.add_event(Event::deleted("a", 200));
        assert!(reconciler.active_items().is_empty());

        reconciler.add_event(Event::created("b", 300));
        assert_eq!(ids(&reconciler.active_items()), ["b"]);

        reconciler.reset();
        assert!(reconciler.active_items().is_empty());
        assert!(reconciler.is_empty());
    }

    #[test]
    fn delete_with_older_timestamp_still_deletes() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::created("x", 200));
        reconciler.add_event(Event::deleted("x", 100));
        assert!(reconciler.active_items().is_empty());
    }

    #[test]
    fn reading_does_not_mutate_log() {
        let reconciler: EventReconciler =
            [Event::created("a", 1), Event::created("b", 2)].into_iter().collect();

        let first = reconciler.active_items();
        let second = reconciler.active_items();
        assert_eq!(first, second);
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn returned_items_are_copies() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::created("a", 1).with_field("color", "red"));

        let mut items = reconciler.active_items();
        if let Some(item) = items.first_mut() {
            item.fields.insert("color".to_owned(), json!("blue"));
        }

        let fresh = reconciler.active_items();
        assert_eq!(
            fresh.first().and_then(|item| item.field("color")),
            Some(&json!("red"))
        );
    }

    #[test]
    fn reset_forgets_tombstones() {
        let mut reconciler = EventReconciler::new();
        reconciler.add_event(Event::created("x", 1));
        reconciler.add_event(Event::deleted("x", 2));
        assert!(reconciler.snapshot().is_tombstoned("x"));

        reconciler.reset();
        reconciler.add_event(Event::created("x", 3));
        assert_eq!(ids(&reconciler.active_items()), ["x"]);
    }
}
