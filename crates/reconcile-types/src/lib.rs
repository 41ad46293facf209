//! Shared type definitions for arrival-order event reconciliation.
//!
//! This crate is the single source of truth for the data that crosses the
//! reconciler boundary: the events a caller feeds in and the items it reads
//! back.
//!
//! # Modules
//!
//! - [`ids`] -- Opaque entity identifiers
//! - [`enums`] -- The lifecycle event kind tag
//! - [`structs`] -- Events and materialized items

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::EventKind;
pub use ids::{EntityId, InvalidEntityId};
pub use structs::{Event, Item, RESERVED_KEYS, Timestamp};
