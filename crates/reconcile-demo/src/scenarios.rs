//! Preset arrival sequences and the shuffled random stream.
//!
//! Each preset exercises one reconciliation rule. The random stream takes a
//! fixed set of events for three items and delivers them in a shuffled
//! order, so repeated runs show the same rules holding under different
//! arrival orders.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use reconcile_types::Event;

use crate::error::DemoError;

/// A named, fixed arrival sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Two creates, then an update to the first item.
    Basic,
    /// A create arriving after the delete for the same id.
    LateCreateAfterDelete,
    /// Every create and update delivered twice.
    DuplicateEvents,
    /// Update before create, and a stale create after delete.
    OutOfOrder,
    /// A delete that arrives before any create.
    DeleteBeforeCreate,
}

impl Scenario {
    /// Every preset, in display order.
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::LateCreateAfterDelete,
        Self::DuplicateEvents,
        Self::OutOfOrder,
        Self::DeleteBeforeCreate,
    ];

    /// The command-line name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::LateCreateAfterDelete => "late-create-after-delete",
            Self::DuplicateEvents => "duplicate-events",
            Self::OutOfOrder => "out-of-order",
            Self::DeleteBeforeCreate => "delete-before-create",
        }
    }

    /// A human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::LateCreateAfterDelete => "Late create after delete",
            Self::DuplicateEvents => "Duplicate events",
            Self::OutOfOrder => "Out of order",
            Self::DeleteBeforeCreate => "Delete before create",
        }
    }

    /// Look a preset up by its command-line name.
    pub fn from_name(name: &str) -> Result<Self, DemoError> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == name)
            .ok_or_else(|| DemoError::UnknownScenario {
                name: name.to_owned(),
            })
    }

    /// The events of this preset, in arrival order.
    pub fn events(self) -> Vec<Event> {
        match self {
            Self::Basic => vec![
                Event::created("a", 100),
                Event::created("b", 200),
                Event::updated("a", 150),
            ],
            Self::LateCreateAfterDelete => vec![
                Event::created("x", 100),
                Event::deleted("x", 200),
                Event::created("x", 50),
            ],
            Self::DuplicateEvents => vec![
                Event::created("d", 100),
                Event::created("d", 100),
                Event::updated("d", 150),
                Event::updated("d", 150),
            ],
            Self::OutOfOrder => vec![
                Event::updated("y", 300),
                Event::created("y", 100),
                Event::created("z", 250),
                Event::deleted("y", 200),
                Event::created("y", 50),
            ],
            Self::DeleteBeforeCreate => vec![
                Event::deleted("w", 200),
                Event::created("w", 100),
            ],
        }
    }
}

impl core::fmt::Display for Scenario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// The events the random stream draws from, before shuffling.
pub fn stream_events() -> Vec<Event> {
    vec![
        Event::created("item-1", 100),
        Event::created("item-2", 200),
        Event::updated("item-1", 150),
        Event::deleted("item-1", 250),
        Event::created("item-1", 50),
        Event::created("item-3", 300),
    ]
}

/// Shuffle the stream events.
///
/// With a seed the order is reproducible; without one it comes from the OS
/// entropy source.
pub fn shuffled_stream(seed: Option<u64>) -> Vec<Event> {
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut events = stream_events();
    events.shuffle(&mut rng);
    events
}
