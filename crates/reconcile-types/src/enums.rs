//! Lifecycle event kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `type` tag of a lifecycle event.
///
/// Only `created`, `updated` and `deleted` carry meaning. Any other tag is
/// kept verbatim in [`EventKind::Unrecognized`] so the event log stays a
/// lossless record of what arrived; the fold treats it as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum EventKind {
    /// The entity came into existence (or was re-created).
    Created,
    /// Some fields of the entity changed.
    Updated,
    /// The entity was deleted. Terminal for its id.
    Deleted,
    /// A tag the reconciler does not recognize, exactly as it arrived.
    ///
    /// Holds any JSON value, including `null` and non-strings.
    Unrecognized(Value),
    /// The payload had no `type` key at all.
    #[default]
    Absent,
}

impl EventKind {
    /// Whether this is one of the three lifecycle kinds.
    pub const fn is_recognized(&self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Deleted)
    }

    /// Whether the payload carried no `type` key.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Updated => f.write_str("updated"),
            Self::Deleted => f.write_str("deleted"),
            Self::Unrecognized(Value::String(tag)) => f.write_str(tag),
            Self::Unrecognized(other) => write!(f, "{other}"),
            Self::Absent => Ok(()),
        }
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            other => Self::Unrecognized(Value::from(other)),
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            _ => Self::Unrecognized(Value::String(tag)),
        }
    }
}

impl From<Value> for EventKind {
    fn from(tag: Value) -> Self {
        match tag {
            Value::String(s) => Self::from(s),
            other => Self::Unrecognized(other),
        }
    }
}

impl From<EventKind> for Value {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Created => Self::from("created"),
            EventKind::Updated => Self::from("updated"),
            EventKind::Deleted => Self::from("deleted"),
            EventKind::Unrecognized(tag) => tag,
            EventKind::Absent => Self::Null,
        }
    }
}
