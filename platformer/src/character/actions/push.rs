use serde::{Deserialize, Serialize};

use super::ground_movement::{self, GroundMovement};
use crate::character::action::{ActionContext, CharacterAction, MoveContext};
use crate::character::state::CharacterState;
use crate::character::Character;
use crate::collision::types::{ShapeId, sign};
use crate::collision::world::CollisionWorld;
use crate::config::Configuration;
use crate::timer::{Cooldown, frames_for};

pub const NAME: &str = "push";

/// Pushing boxes: after leaning against a box for a while the character
/// slows down and moves the box along with it.
///
/// A box is any other character whose shape carries the box tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Push {
    /// Speed while pushing (units per second).
    pub speed: f32,
    pub acceleration_time: f32,
    /// Time leaning against a box before pushing starts (seconds).
    pub start_time: f32,
    pub priority: i32,
    #[serde(skip)]
    smoothing: f32,
    #[serde(skip)]
    leaning: Option<Cooldown>,
}

impl Default for Push {
    fn default() -> Self {
        Self {
            speed: 3.0,
            acceleration_time: 0.1,
            start_time: 0.5,
            priority: 20,
            smoothing: 0.0,
            leaning: None,
        }
    }
}

/// First box-tagged shape the character touches on the side it presses.
fn box_in_front(character: &Character, world: &CollisionWorld, config: &Configuration) -> Option<ShapeId> {
    let dir = sign(character.input_axis());
    if dir == 0.0 || !character.body().collisions().below {
        return None;
    }
    character
        .body()
        .collisions()
        .side_hits(dir)
        .iter()
        .map(|hit| hit.shape)
        .find(|shape| config.tags.is_box(world.tag(*shape)))
}

impl CharacterAction for Push {
    fn name(&self) -> &'static str {
        NAME
    }

    fn requires(&self) -> &'static [&'static str] {
        &[ground_movement::NAME]
    }

    fn wanted_priority(&mut self, character: &Character, cx: &ActionContext<'_>) -> i32 {
        let fixed_delta = cx.config.fixed_delta;
        let start_time = self.start_time;
        let leaning = self
            .leaning
            .get_or_insert_with(|| Cooldown::new(frames_for(start_time, fixed_delta)));

        if box_in_front(character, cx.world, cx.config).is_none() {
            leaning.reset();
            return 0;
        }
        if leaning.inc_ready() { self.priority } else { 0 }
    }

    fn gain_control(&mut self, character: &mut Character, _delta: f32) {
        self.smoothing = 0.0;
        character.enter_state(CharacterState::Pushing);
    }

    fn perform(&mut self, character: &mut Character, cx: &ActionContext<'_>) {
        GroundMovement::accelerate(
            character,
            &mut self.smoothing,
            self.speed,
            self.acceleration_time,
            cx.delta,
        );
    }

    fn lose_control(&mut self, character: &mut Character, _delta: f32) {
        character.exit_state(CharacterState::Pushing);
    }

    fn before_move(&mut self, character: &mut Character, cx: &mut MoveContext<'_, '_>) {
        if !character.is_on_state(CharacterState::Pushing) {
            return;
        }
        let Some(shape) = box_in_front(character, cx.world, cx.config) else {
            return;
        };
        let Some(pushed) = cx.neighbours.by_shape_mut(shape) else {
            log::warn!("shape {:?} is tagged as a box but no character owns it", shape);
            return;
        };
        // Boxes riding a platform move with the platform only.
        if pushed.platform().is_some() {
            return;
        }
        // The pusher's gravity keeps the box pressed onto the ground.
        pushed.displace(cx.world, cx.config, character.velocity * cx.delta);
    }
}
