//! Arrival-order reconciliation of entity lifecycle events.
//!
//! Events for an entity (`created`, `updated`, `deleted`) may arrive in any
//! order and with skewed timestamps. The reconciler trusts arrival order
//! alone: it keeps an append-only log and folds it into the set of currently
//! active entities whenever asked.
//!
//! # Architecture
//!
//! - [`reconciler`] -- The [`EventReconciler`]: append-only log with
//!   add/read/reset.
//! - [`fold`] -- The folding rule, per-event [`Applied`] outcomes, and the
//!   batch [`process_events`] helper.
//! - [`snapshot`] -- The [`Snapshot`] a fold produces.
//!
//! # Sticky Tombstones
//!
//! Once an id receives a `deleted` event, every later event for it is
//! discarded. A late `created` (common under at-least-once or reordered
//! delivery) can never resurrect the entity:
//!
//! ```
//! use reconcile_core::EventReconciler;
//! use reconcile_types::Event;
//!
//! let mut reconciler = EventReconciler::new();
//! reconciler.add_event(Event::created("x", 100));
//! reconciler.add_event(Event::deleted("x", 200));
//! reconciler.add_event(Event::created("x", 50));
//!
//! assert!(reconciler.active_items().is_empty());
//! ```
//!
//! # Ordering
//!
//! Items come back in the order their ids were first created, never sorted
//! by timestamp:
//!
//! ```
//! use reconcile_core::process_events;
//! use reconcile_types::Event;
//!
//! let items = process_events(&[
//!     Event::created("1", 100),
//!     Event::created("2", 50),
//!     Event::created("3", 200),
//! ]);
//! let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
//! assert_eq!(ids, ["1", "2", "3"]);
//! ```

pub mod fold;
pub mod reconciler;
pub mod snapshot;

// Re-export primary types at crate root.
pub use fold::{Applied, Fold, IgnoreReason, process_events};
pub use reconciler::EventReconciler;
pub use snapshot::Snapshot;
