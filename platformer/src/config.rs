//! Simulation configuration.
//!
//! A single immutable [`Configuration`] value is built once and passed by
//! reference into bodies, platforms and characters. Tag names are plain strings
//! attached to world shapes; [`TagConfig`] turns them into the surface
//! predicates the collision passes need.

use serde::{Deserialize, Serialize};

use crate::collision::types::Vec2;
use crate::constants::{DEFAULT_FIXED_DELTA, DEFAULT_GRAVITY, DEFAULT_SKIN_WIDTH};

/// Tag names recognised by the collision passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Blocks only bodies coming from above.
    pub one_way_platform_up: String,
    /// Blocks only bodies coming from below.
    pub one_way_platform_down: String,
    /// Blocks only bodies moving right into it.
    pub one_way_wall_left: String,
    /// Blocks only bodies moving left into it.
    pub one_way_wall_right: String,
    /// A moving platform that riders may drop through.
    pub moving_platform_through: String,
    /// Any moving platform.
    pub moving_platform: String,
    /// A pushable box.
    pub pushable_box: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            one_way_platform_up: "OneWayPlatformUp".into(),
            one_way_platform_down: "OneWayPlatformDown".into(),
            one_way_wall_left: "OneWayWallLeft".into(),
            one_way_wall_right: "OneWayWallRight".into(),
            moving_platform_through: "MovingPlatformThrough".into(),
            moving_platform: "MovingPlatform".into(),
            pushable_box: "Box".into(),
        }
    }
}

impl TagConfig {
    #[inline]
    fn matches(tag: Option<&str>, name: &str) -> bool {
        tag == Some(name)
    }

    pub fn is_one_way_platform_up(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.one_way_platform_up)
    }

    pub fn is_one_way_platform_down(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.one_way_platform_down)
    }

    /// Either one-way platform direction.
    pub fn is_one_way_platform(&self, tag: Option<&str>) -> bool {
        self.is_one_way_platform_up(tag) || self.is_one_way_platform_down(tag)
    }

    pub fn is_one_way_wall_left(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.one_way_wall_left)
    }

    pub fn is_one_way_wall_right(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.one_way_wall_right)
    }

    /// Either one-way wall direction.
    pub fn is_one_way_wall(&self, tag: Option<&str>) -> bool {
        self.is_one_way_wall_left(tag) || self.is_one_way_wall_right(tag)
    }

    pub fn is_moving_platform_through(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.moving_platform_through)
    }

    /// Plain moving platforms and the pass-through kind both count.
    pub fn is_moving_platform(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.moving_platform) || self.is_moving_platform_through(tag)
    }

    pub fn is_box(&self, tag: Option<&str>) -> bool {
        Self::matches(tag, &self.pushable_box)
    }
}

/// World-wide simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Default gravity applied to characters (units per second squared).
    pub gravity: [f32; 2],

    /// Gap kept between a body and the floor/ceiling it resolves against.
    pub min_distance_to_env: f32,

    /// Length of one fixed tick (seconds).
    pub fixed_delta: f32,

    /// Surface tag names.
    pub tags: TagConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            min_distance_to_env: DEFAULT_SKIN_WIDTH,
            fixed_delta: DEFAULT_FIXED_DELTA,
            tags: TagConfig::default(),
        }
    }
}

impl Configuration {
    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = [x, y];
        self
    }

    /// Set the floor/ceiling gap
    pub fn with_min_distance_to_env(mut self, distance: f32) -> Self {
        self.min_distance_to_env = distance;
        self
    }

    /// Set the fixed tick length
    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }

    /// Replace the tag names
    pub fn with_tags(mut self, tags: TagConfig) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::new(self.gravity[0], self.gravity[1])
    }
}
