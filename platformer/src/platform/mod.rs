//! Moving platforms.
//!
//! A platform is a box shape in the collision world that follows a waypoint
//! path and carries whatever rides on or is pushed by it. Each tick runs in
//! three steps, driven by the simulation:
//!
//! 1. [`MovingPlatform::plan`] computes this tick's displacement and the
//!    passenger movement list.
//! 2. The simulation moves the "before" passengers, calls
//!    [`MovingPlatform::translate`], then moves the "after" passengers.
//! 3. [`MovingPlatform::finish_riders`] diffs riders against last tick.

pub mod commands;
pub mod passengers;
pub mod path;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::collision::probe::{ProbeLayout, RaycastOrigins};
use crate::collision::types::{Bounds, CollisionLayer, LayerMask, ShapeId, Vec2};
use crate::collision::world::{CollisionWorld, ShapeDesc};
use crate::config::Configuration;
use crate::constants::{DEFAULT_PLATFORM_SPEED, DEFAULT_RAY_COUNT, DEFAULT_SKIN_WIDTH};
use crate::error::{Result, SetupError};
use crate::events::PlatformEvent;

pub use commands::PlatformCommand;
pub use passengers::{PassengerMovement, RiderDiff};
pub use path::{WaypointPath, ease};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    /// Travel speed (units per second).
    pub speed: f32,
    /// Loop back to the first waypoint instead of bouncing.
    pub cyclic: bool,
    /// Pause after each waypoint (seconds).
    pub wait_time: f32,
    /// Ease amount in `[0, 2]`; 0 is linear.
    pub ease_amount: f32,
    pub skin_width: f32,
    pub horizontal_ray_count: u32,
    pub vertical_ray_count: u32,
    /// Layers of the shapes the platform carries. Only shapes owned by a
    /// character are ever moved.
    pub passenger_mask: LayerMask,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PLATFORM_SPEED,
            cyclic: false,
            wait_time: 0.0,
            ease_amount: 0.0,
            skin_width: DEFAULT_SKIN_WIDTH,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            passenger_mask: LayerMask::single(CollisionLayer::CHARACTERS),
        }
    }
}

/// Everything needed to build a platform.
#[derive(Debug, Clone)]
pub struct PlatformDesc {
    /// Starting center of the platform box.
    pub position: Vec2,
    pub half_extents: Vec2,
    /// Waypoints relative to `position`.
    pub local_waypoints: Vec<Vec2>,
    pub layer: CollisionLayer,
    pub tag: Option<String>,
    pub settings: PlatformSettings,
}

impl PlatformDesc {
    pub fn new(position: Vec2, half_extents: Vec2, local_waypoints: Vec<Vec2>) -> Self {
        Self {
            position,
            half_extents,
            local_waypoints,
            layer: CollisionLayer::DEFAULT,
            tag: None,
            settings: PlatformSettings::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_settings(mut self, settings: PlatformSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[derive(Debug, Clone)]
pub struct MovingPlatform {
    shape: ShapeId,
    half_extents: Vec2,
    settings: PlatformSettings,
    layout: ProbeLayout,
    path: WaypointPath,
    velocity: Vec2,
    passengers: Vec<PassengerMovement>,
    previous_riders: BTreeSet<ShapeId>,
}

impl MovingPlatform {
    pub fn spawn(world: &mut CollisionWorld, config: &Configuration, desc: PlatformDesc) -> Result<Self> {
        if desc.local_waypoints.len() < 2 {
            return Err(SetupError::NotEnoughWaypoints(desc.local_waypoints.len()));
        }
        if !(desc.half_extents.x > 0.0 && desc.half_extents.y > 0.0) {
            return Err(SetupError::InvalidExtents(desc.half_extents.x, desc.half_extents.y));
        }
        if !config.tags.is_moving_platform(desc.tag.as_deref()) {
            log::warn!(
                "moving platform at ({}, {}) is tagged {:?}; riders will not treat it as a platform",
                desc.position.x,
                desc.position.y,
                desc.tag
            );
        }

        let mut shape = ShapeDesc::cuboid(desc.position, desc.half_extents).with_layer(desc.layer);
        shape.tag = desc.tag;
        let shape = world.insert(shape);

        let bounds = Bounds::from_center(desc.position, desc.half_extents);
        let layout = ProbeLayout::new(
            &bounds,
            desc.settings.skin_width,
            desc.settings.horizontal_ray_count,
            desc.settings.vertical_ray_count,
        );
        let waypoints = desc
            .local_waypoints
            .iter()
            .map(|w| w + desc.position)
            .collect();
        let path = WaypointPath::new(waypoints, &desc.settings, config.fixed_delta);

        Ok(Self {
            shape,
            half_extents: desc.half_extents,
            settings: desc.settings,
            layout,
            path,
            velocity: Vec2::zeros(),
            passengers: Vec::new(),
            previous_riders: BTreeSet::new(),
        })
    }

    #[inline]
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn position(&self, world: &CollisionWorld) -> Vec2 {
        world.position(self.shape).unwrap_or_else(Vec2::zeros)
    }

    /// Displacement planned for the current tick.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn passengers(&self) -> &[PassengerMovement] {
        &self.passengers
    }

    pub fn world_waypoints(&self) -> &[Vec2] {
        self.path.waypoints()
    }

    pub fn current_segment(&self) -> usize {
        self.path.current_segment()
    }

    pub fn percent(&self) -> f32 {
        self.path.percent()
    }

    /// Computes this tick's displacement and rebuilds the passenger list.
    pub fn plan(&mut self, world: &mut CollisionWorld, config: &Configuration, delta: f32) -> Vec2 {
        let position = self.position(world);
        self.velocity = self.path.advance(position, delta);

        // The probes start inside the platform box; hide it from them.
        let saved = world.set_layer(self.shape, CollisionLayer::IGNORE_PROBES);
        let bounds = Bounds::from_center(position, self.half_extents);
        let origins = RaycastOrigins::new(&bounds, self.settings.skin_width);
        let probe = passengers::PassengerProbe {
            world,
            origins: &origins,
            layout: &self.layout,
            skin_width: self.settings.skin_width,
            min_distance_to_env: config.min_distance_to_env,
            mask: self.settings.passenger_mask,
        };
        self.passengers = passengers::find_passengers(&probe, self.velocity);
        if let Some(layer) = saved {
            world.set_layer(self.shape, layer);
        }

        self.velocity
    }

    /// Applies the planned displacement to the platform box.
    pub fn translate(&mut self, world: &mut CollisionWorld) {
        world.translate(self.shape, self.velocity);
    }

    /// Diffs this tick's riders against last tick's.
    pub fn finish_riders(&mut self) -> RiderDiff {
        passengers::diff_riders(&mut self.previous_riders, &self.passengers)
    }

    pub fn start(&mut self) {
        self.resume();
    }

    pub fn stop(&mut self) {
        log::debug!("platform {:?} stopped", self.shape);
        self.path.stop();
    }

    pub fn resume(&mut self) {
        log::debug!("platform {:?} resumed", self.shape);
        self.path.resume();
    }

    pub fn stop_on(&mut self, waypoints: u32) {
        self.path.stop_on(waypoints);
    }

    pub fn reverse(&mut self) {
        self.path.reverse();
    }

    pub fn is_stopped(&self) -> bool {
        self.path.is_stopped()
    }

    pub fn apply(&mut self, command: PlatformCommand) {
        command.apply(self);
    }

    pub fn drain_events(&mut self) -> Vec<PlatformEvent> {
        self.path.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn(world: &mut CollisionWorld, cyclic: bool) -> MovingPlatform {
        let desc = PlatformDesc::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.25),
            vec![Vec2::zeros(), Vec2::new(0.0, 2.0)],
        )
        .with_tag("MovingPlatform")
        .with_settings(PlatformSettings {
            cyclic,
            ..Default::default()
        });
        MovingPlatform::spawn(world, &Configuration::default(), desc).unwrap()
    }

    #[test]
    fn spawn_validates_waypoints() {
        let mut world = CollisionWorld::new();
        let desc = PlatformDesc::new(Vec2::zeros(), Vec2::new(1.0, 0.25), vec![Vec2::zeros()]);
        let err = MovingPlatform::spawn(&mut world, &Configuration::default(), desc).unwrap_err();
        assert_eq!(err, SetupError::NotEnoughWaypoints(1));
        assert!(world.is_empty());
    }

    #[test]
    fn untagged_platform_still_works() {
        let mut world = CollisionWorld::new();
        let desc = PlatformDesc::new(
            Vec2::zeros(),
            Vec2::new(1.0, 0.25),
            vec![Vec2::zeros(), Vec2::new(1.0, 0.0)],
        );
        let mut platform = MovingPlatform::spawn(&mut world, &Configuration::default(), desc).unwrap();
        let v = platform.plan(&mut world, &Configuration::default(), 1.0 / 60.0);
        assert!(v.x > 0.0);
    }

    #[test]
    fn plan_then_translate_moves_the_shape() {
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut platform = spawn(&mut world, false);

        let v = platform.plan(&mut world, &config, 1.0 / 60.0);
        assert_relative_eq!(v.y, 2.0 / 60.0, epsilon = 1e-5);
        platform.translate(&mut world);
        assert_relative_eq!(platform.position(&world).y, 2.0 / 60.0, epsilon = 1e-5);
        assert_eq!(world.layer(platform.shape()), Some(CollisionLayer::DEFAULT));
    }

    #[test]
    fn rider_is_carried_and_departs() {
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut platform = spawn(&mut world, false);
        let rider = world.insert(
            ShapeDesc::cuboid(Vec2::new(0.0, 0.75), Vec2::new(1.0, 0.5)).with_layer(CollisionLayer::CHARACTERS),
        );

        platform.plan(&mut world, &config, 1.0 / 60.0);
        assert_eq!(platform.passengers().len(), 1);
        assert_eq!(platform.passengers()[0].rider, rider);
        let diff = platform.finish_riders();
        assert_eq!(diff.present, vec![rider]);
        assert!(diff.departed.is_empty());

        // Rider leaves the platform.
        world.set_position(rider, Vec2::new(10.0, 10.0));
        platform.translate(&mut world);
        platform.plan(&mut world, &config, 1.0 / 60.0);
        let diff = platform.finish_riders();
        assert!(diff.present.is_empty());
        assert_eq!(diff.departed, vec![rider]);
    }

    #[test]
    fn level_geometry_is_not_a_passenger() {
        let mut world = CollisionWorld::new();
        let config = Configuration::default();
        let mut platform = spawn(&mut world, false);
        // Resting right on top, but on the level geometry layer.
        world.insert(ShapeDesc::cuboid(Vec2::new(0.0, 0.75), Vec2::new(1.0, 0.5)));

        platform.plan(&mut world, &config, 1.0 / 60.0);
        assert!(platform.passengers().is_empty());
        assert!(!PlatformSettings::default().passenger_mask.contains(CollisionLayer::DEFAULT));
    }

    #[test]
    fn commands_drive_the_path() {
        let mut world = CollisionWorld::new();
        let mut platform = spawn(&mut world, true);

        platform.apply(PlatformCommand::Stop);
        assert!(platform.is_stopped());
        platform.apply(PlatformCommand::IfStoppedReverse);
        assert!(!platform.is_stopped());
        platform.apply(PlatformCommand::ReverseAndResumeAndStop);
        assert_eq!(
            platform.drain_events(),
            vec![PlatformEvent::Stopped, PlatformEvent::Resumed, PlatformEvent::Resumed]
        );
        assert_eq!(platform.world_waypoints()[0], Vec2::new(0.0, 2.0));
    }
}
