use serde::{Deserialize, Serialize};

use crate::character::action::{ActionContext, CharacterAction};
use crate::character::state::CharacterState;
use crate::character::Character;
use crate::utils::smooth_damp;

pub const NAME: &str = "ground_movement";

/// Walking on the ground, driven by the horizontal input axis.
///
/// Runs as a forced action whenever the character stands on something and is
/// neither slipping nor pushing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundMovement {
    /// Top speed (units per second).
    pub speed: f32,
    /// Time to reach top speed (seconds).
    pub acceleration_time: f32,
    #[serde(skip)]
    smoothing: f32,
}

impl Default for GroundMovement {
    fn default() -> Self {
        Self {
            speed: 6.0,
            acceleration_time: 0.1,
            smoothing: 0.0,
        }
    }
}

impl GroundMovement {
    /// Eases the horizontal velocity towards `axis * speed`.
    pub fn accelerate(
        character: &mut Character,
        smoothing: &mut f32,
        speed: f32,
        acceleration_time: f32,
        delta: f32,
    ) {
        let target = character.input_axis() * speed;
        character.velocity.x =
            smooth_damp(character.velocity.x, target, smoothing, acceleration_time, delta);
    }
}

impl CharacterAction for GroundMovement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn wanted_priority(&mut self, character: &Character, _cx: &ActionContext<'_>) -> i32 {
        let grounded = character.body().collisions().below;
        if grounded
            && !character.is_on_any_state(&[CharacterState::Slipping, CharacterState::Pushing])
        {
            -1
        } else {
            0
        }
    }

    fn perform(&mut self, character: &mut Character, cx: &ActionContext<'_>) {
        Self::accelerate(
            character,
            &mut self.smoothing,
            self.speed,
            self.acceleration_time,
            cx.delta,
        );
    }
}
