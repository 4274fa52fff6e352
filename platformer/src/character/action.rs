//! Character actions and priority arbitration.
//!
//! Every tick each action reports the priority it wants:
//! - negative: run right away, outside arbitration (forced actions)
//! - zero: not interested
//! - positive: compete; the highest value takes control, ties go to the
//!   action registered first
//!
//! The winner runs after the forced ones and decides whether gravity and world
//! collisions apply to the move that follows.

use super::Character;
use crate::bitmask_flags::BitmaskFlags;
use crate::collision::types::ShapeId;
use crate::collision::world::CollisionWorld;
use crate::config::Configuration;
use crate::define_bitmask_flags;

define_bitmask_flags!(PostUpdate, u8, {
    ApplyGravity,
    WorldCollisions,
});

/// What happens after the controlling action ran.
pub type PostUpdateFlags = BitmaskFlags<u8>;

/// Flags used when no action holds control.
pub fn default_post_update() -> PostUpdateFlags {
    PostUpdateFlags::from_tags(&[PostUpdate::ApplyGravity, PostUpdate::WorldCollisions])
}

/// Read-only view of the tick handed to actions.
pub struct ActionContext<'a> {
    pub delta: f32,
    pub config: &'a Configuration,
    pub world: &'a CollisionWorld,
}

/// The other characters of the simulation, around the one updating.
#[derive(Default)]
pub struct Neighbours<'a> {
    before: &'a mut [Character],
    after: &'a mut [Character],
}

impl<'a> Neighbours<'a> {
    pub fn new(before: &'a mut [Character], after: &'a mut [Character]) -> Self {
        Self { before, after }
    }

    /// The character whose body owns `shape`.
    pub fn by_shape_mut(&mut self, shape: ShapeId) -> Option<&mut Character> {
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|c| c.body().shape() == shape)
    }
}

/// Mutable view of the tick handed to `before_move` hooks.
pub struct MoveContext<'a, 'n> {
    pub delta: f32,
    pub config: &'a Configuration,
    pub world: &'a mut CollisionWorld,
    pub neighbours: &'a mut Neighbours<'n>,
}

pub trait CharacterAction {
    /// Unique name, used by [`requires`](Self::requires).
    fn name(&self) -> &'static str;

    /// Names of actions that must be registered on the same character.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    fn wanted_priority(&mut self, character: &Character, cx: &ActionContext<'_>) -> i32;

    fn gain_control(&mut self, _character: &mut Character, _delta: f32) {}

    fn perform(&mut self, character: &mut Character, cx: &ActionContext<'_>);

    fn lose_control(&mut self, _character: &mut Character, _delta: f32) {}

    fn post_update_flags(&self) -> PostUpdateFlags {
        default_post_update()
    }

    /// Runs on every action, right before the character moves.
    fn before_move(&mut self, _character: &mut Character, _cx: &mut MoveContext<'_, '_>) {}
}

/// Asks every action for its priority, runs the forced ones on the spot and
/// returns the index of the winner.
pub fn arbitrate(
    actions: &mut [Box<dyn CharacterAction>],
    character: &mut Character,
    cx: &ActionContext<'_>,
) -> Option<usize> {
    let mut best = 0;
    let mut winner = None;
    for (index, action) in actions.iter_mut().enumerate() {
        let priority = action.wanted_priority(character, cx);
        if priority < 0 {
            action.perform(character, cx);
        } else if priority > best {
            best = priority;
            winner = Some(index);
        }
    }
    winner
}

/// First `(action, missing)` pair whose requirement is not registered.
pub fn missing_requirement(actions: &[Box<dyn CharacterAction>]) -> Option<(&'static str, &'static str)> {
    actions.iter().find_map(|action| {
        action
            .requires()
            .iter()
            .find(|req| !actions.iter().any(|a| a.name() == **req))
            .map(|req| (action.name(), *req))
    })
}
