/*!
Per-body collision settings.

These are the tunables a kinematic body is built with. Defaults come from
[`crate::constants`]; override them per body from game data.

Notes
- Distances are in world units, angles in degrees.
- Ray counts below [`MIN_RAY_COUNT`] are raised to it.
*/

use serde::{Deserialize, Serialize};

use super::types::{LayerMask, Vec2};
use crate::constants::{
    DEFAULT_HORIZONTAL_RAY_LENGTH, DEFAULT_MAX_CLIMB_ANGLE, DEFAULT_MAX_DESCEND_ANGLE,
    DEFAULT_MIN_TRANSLATION, DEFAULT_RAY_COUNT, DEFAULT_SKIN_WIDTH, DEFAULT_VERTICAL_RAY_LENGTH,
    MIN_RAY_COUNT,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    /// Inset between the box and the probe origins.
    pub skin_width: f32,
    /// Probes per vertical side (left/right), spread along Y.
    pub horizontal_ray_count: u32,
    /// Probes per horizontal side (top/bottom), spread along X.
    pub vertical_ray_count: u32,
    /// Layers the body collides with.
    pub collision_mask: LayerMask,
    pub max_climb_angle: f32,
    pub max_descend_angle: f32,
    /// Slope handling on spawn; can be toggled at runtime.
    pub enable_slopes: bool,
    pub horizontal_ray_length: f32,
    pub vertical_ray_length: f32,
    pub min_translation: f32,
    /// Overrides the configured world gravity for this body.
    pub gravity: Option<[f32; 2]>,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            skin_width: DEFAULT_SKIN_WIDTH,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            collision_mask: LayerMask::ALL,
            max_climb_angle: DEFAULT_MAX_CLIMB_ANGLE,
            max_descend_angle: DEFAULT_MAX_DESCEND_ANGLE,
            enable_slopes: true,
            horizontal_ray_length: DEFAULT_HORIZONTAL_RAY_LENGTH,
            vertical_ray_length: DEFAULT_VERTICAL_RAY_LENGTH,
            min_translation: DEFAULT_MIN_TRANSLATION,
            gravity: None,
        }
    }
}

impl BodySettings {
    pub fn with_collision_mask(mut self, mask: LayerMask) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_ray_counts(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_ray_count = horizontal;
        self.vertical_ray_count = vertical;
        self
    }

    pub fn with_slopes(mut self, enabled: bool) -> Self {
        self.enable_slopes = enabled;
        self
    }

    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = Some([x, y]);
        self
    }

    #[inline]
    pub fn horizontal_rays(&self) -> u32 {
        self.horizontal_ray_count.max(MIN_RAY_COUNT)
    }

    #[inline]
    pub fn vertical_rays(&self) -> u32 {
        self.vertical_ray_count.max(MIN_RAY_COUNT)
    }

    #[inline]
    pub fn gravity_override(&self) -> Option<Vec2> {
        self.gravity.map(|[x, y]| Vec2::new(x, y))
    }
}
