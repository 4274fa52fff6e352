//! Simulation events.
//!
//! Bodies, platforms and characters never call back into user code. They
//! append events to a local outbox during their update, and the simulation
//! collects everything into one ordered queue per tick.

use crate::bitmask_flags::BitmaskFlags;
use crate::character::state::{AreaSet, StateSet};
use crate::character::CharacterId;
use crate::define_bitmask_flags;
use crate::platform::PlatformId;

define_bitmask_flags!(ContactEvent, u8, {
    Landing,
    LeaveGround,
    LeftWall,
    RightWall,
    Top,
});

/// Contact edges produced by a single move.
pub type ContactEvents = BitmaskFlags<u8>;

/// Events raised by a character.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterEvent {
    /// Contact edge from this tick's move.
    Contact(ContactEvent),
    /// Net state change of one outward enter/exit call.
    StateChanged { before: StateSet, after: StateSet },
    AreaChanged { before: AreaSet, after: AreaSet },
    BeforeMove { delta: f32 },
    AfterMove { delta: f32 },
    /// The character started or stopped riding a platform.
    PlatformChanged {
        before: Option<PlatformId>,
        after: Option<PlatformId>,
    },
}

impl CharacterEvent {
    pub fn is_contact(&self, contact: ContactEvent) -> bool {
        matches!(self, CharacterEvent::Contact(c) if *c == contact)
    }

    pub fn is_state_change(&self) -> bool {
        matches!(self, CharacterEvent::StateChanged { .. })
    }
}

/// Events raised by a moving platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Reached a waypoint; the index is the new segment start.
    ReachedWaypoint(usize),
    Stopped,
    Resumed,
}

/// Anything the simulation reports after a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Character {
        id: CharacterId,
        event: CharacterEvent,
    },
    Platform {
        id: PlatformId,
        event: PlatformEvent,
    },
}

impl SimEvent {
    pub fn character(id: CharacterId, event: CharacterEvent) -> Self {
        SimEvent::Character { id, event }
    }

    pub fn platform(id: PlatformId, event: PlatformEvent) -> Self {
        SimEvent::Platform { id, event }
    }

    /// The character event, if this is one for `id`.
    pub fn for_character(&self, id: CharacterId) -> Option<&CharacterEvent> {
        match self {
            SimEvent::Character { id: c, event } if *c == id => Some(event),
            _ => None,
        }
    }

    /// The platform event, if this is one for `id`.
    pub fn for_platform(&self, id: PlatformId) -> Option<PlatformEvent> {
        match self {
            SimEvent::Platform { id: p, event } if *p == id => Some(*event),
            _ => None,
        }
    }
}

/// Expands a set of contact edges into events, in a fixed order.
pub fn contact_events(edges: ContactEvents) -> impl Iterator<Item = CharacterEvent> {
    ContactEvent::ALL
        .iter()
        .copied()
        .filter(move |c| edges.has(*c))
        .map(CharacterEvent::Contact)
}
