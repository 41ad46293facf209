//! Opaque entity identifiers.
//!
//! An [`EntityId`] is only ever compared for equality (and hashed or ordered
//! so it can key collections). Its content is never interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of an entity whose lifecycle events are being reconciled.
///
/// Any JSON scalar is accepted on the wire. Strings are the common case;
/// numbers, booleans and `null` are kept as their JSON text and serialize
/// back unchanged. A string id never equals a non-string one, so `"7"` and
/// `7` name different entities. Numbers compare by their JSON text, so `7`
/// and `7.0` differ as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct EntityId(Repr);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    Text(String),
    Scalar(String),
}

impl EntityId {
    /// Create a string identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Repr::Text(id.into()))
    }

    /// The identifier's text: the string itself, or the JSON text of a
    /// non-string id.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Text(text) | Repr::Scalar(text) => text,
        }
    }

    /// Whether the id arrived as a JSON string.
    pub const fn is_text(&self) -> bool {
        matches!(self.0, Repr::Text(_))
    }

    /// Return the identifier's text.
    pub fn into_inner(self) -> String {
        match self.0 {
            Repr::Text(text) | Repr::Scalar(text) => text,
        }
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&Self> for EntityId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(Repr::Scalar(id.to_string()))
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.into_inner()
    }
}

/// A JSON array or object offered as an entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntityId;

impl core::fmt::Display for InvalidEntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("entity id must be a JSON scalar")
    }
}

impl std::error::Error for InvalidEntityId {}

impl TryFrom<Value> for EntityId {
    type Error = InvalidEntityId;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self(Repr::Text(text))),
            Value::Array(_) | Value::Object(_) => Err(InvalidEntityId),
            scalar => Ok(Self(Repr::Scalar(scalar.to_string()))),
        }
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        match id.0 {
            Repr::Text(text) => Self::String(text),
            // Scalar text always came from a serialized `Value`.
            Repr::Scalar(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => Self::String(text),
            },
        }
    }
}
