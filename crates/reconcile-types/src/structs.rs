//! Events as they arrive and items as they are materialized.
//!
//! Both serialize to flat JSON objects: `id`, `timestamp` and `type` are
//! named fields, everything else lives in an open field map that is merged
//! shallowly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::enums::EventKind;
use crate::ids::EntityId;

/// Opaque event timestamp.
///
/// Carried as payload only, whatever its JSON shape: epoch numbers and
/// ISO strings alike. Nothing orders or compares events by it.
pub type Timestamp = Value;

/// Payload keys that map onto named fields rather than the open field map.
pub const RESERVED_KEYS: [&str; 3] = ["id", "timestamp", "type"];

/// A key that is present deserializes to `Some`, even when its value is
/// `null`. Only a missing key is `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A lifecycle event for one entity.
///
/// Immutable once appended to a log. A missing `timestamp` is `None` and a
/// missing `type` is [`EventKind::Absent`]; neither key is written back out,
/// so a parsed event re-serializes to the payload it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The entity this event is about.
    pub id: EntityId,
    /// Producer-supplied clock value.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Timestamp>,
    /// What happened to the entity.
    #[serde(rename = "type", default, skip_serializing_if = "EventKind::is_absent")]
    pub kind: EventKind,
    /// Every other payload field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// Create an event with no extra fields.
    pub fn new(id: impl Into<EntityId>, timestamp: impl Into<Timestamp>, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            timestamp: Some(timestamp.into()),
            kind,
            fields: Map::new(),
        }
    }

    /// Shorthand for a `created` event.
    pub fn created(id: impl Into<EntityId>, timestamp: impl Into<Timestamp>) -> Self {
        Self::new(id, timestamp, EventKind::Created)
    }

    /// Shorthand for an `updated` event.
    pub fn updated(id: impl Into<EntityId>, timestamp: impl Into<Timestamp>) -> Self {
        Self::new(id, timestamp, EventKind::Updated)
    }

    /// Shorthand for a `deleted` event.
    pub fn deleted(id: impl Into<EntityId>, timestamp: impl Into<Timestamp>) -> Self {
        Self::new(id, timestamp, EventKind::Deleted)
    }

    /// Attach an extra payload field.
    ///
    /// Keys in [`RESERVED_KEYS`] are ignored: they would collide with the
    /// named fields on the wire.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.fields.insert(key, value.into());
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// The materialized state of an active entity.
///
/// Built from the `created` event that (re)created it, then shallow-merged
/// with every accepted `updated` event after that. `kind` is the type of the
/// last event applied, mirroring the flat payload it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The entity id.
    pub id: EntityId,
    /// Timestamp of the last event that supplied one.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Timestamp>,
    /// Type of the last event applied to this item.
    #[serde(rename = "type", default, skip_serializing_if = "EventKind::is_absent")]
    pub kind: EventKind,
    /// Merged payload fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Look up a payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow-merge `event` into this item.
    ///
    /// Fields present in the event overwrite existing ones. Fields the event
    /// does not carry (including an absent timestamp) keep their values.
    pub fn merge(&mut self, event: &Event) {
        if let Some(timestamp) = &event.timestamp {
            self.timestamp = Some(timestamp.clone());
        }
        self.kind = event.kind.clone();
        for (key, value) in &event.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

impl From<&Event> for Item {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            timestamp: event.timestamp.clone(),
            kind: event.kind.clone(),
            fields: event.fields.clone(),
        }
    }
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            kind: event.kind,
            fields: event.fields,
        }
    }
}
