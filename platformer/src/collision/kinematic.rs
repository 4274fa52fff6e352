use super::probe::{Probe, ProbeLayout, RaycastOrigins};
use super::settings::BodySettings;
use super::slope;
use super::state::CollisionState;
use super::types::{Bounds, CollisionLayer, ShapeId, Vec2, sign};
use super::world::{CollisionWorld, ShapeDesc};
use crate::config::Configuration;
use crate::error::{Result, SetupError};
use crate::events::ContactEvents;

/// Effects a body asks the scheduler to run on it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyEffect {
    EnableSlopes,
    ResetFallThrough,
}

/// A pending request for a delayed [`BodyEffect`], in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredEffect {
    pub effect: BodyEffect,
    pub delay: f32,
}

/// Result of a single [`KinematicBody::move_by`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied.
    pub velocity: Vec2,
    /// Contact edges against the previous move.
    pub contacts: ContactEvents,
}

/// An axis-aligned box moved by probing the world around it.
///
/// The body's box is registered in the [`CollisionWorld`] so other bodies can
/// hit it. During its own move the box is parked on
/// [`CollisionLayer::IGNORE_PROBES`] so its probes never hit itself.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    shape: ShapeId,
    half_extents: Vec2,
    settings: BodySettings,
    layout: ProbeLayout,
    collisions: CollisionState,
    previous: CollisionState,
    slopes_enabled: bool,
    /// Stick to slopes steeper than the max descend angle too.
    pub ignore_descend_angle: bool,
    /// Skip every probe pass and apply requested motion as is.
    pub disable_world_collisions: bool,
    deferred: Vec<DeferredEffect>,
}

impl KinematicBody {
    /// Registers a box shape for the body and builds it.
    pub fn spawn(
        world: &mut CollisionWorld,
        position: Vec2,
        half_extents: Vec2,
        layer: CollisionLayer,
        tag: Option<String>,
        settings: BodySettings,
    ) -> Result<Self> {
        if !(half_extents.x > 0.0 && half_extents.y > 0.0) {
            return Err(SetupError::InvalidExtents(half_extents.x, half_extents.y));
        }
        let mut desc = ShapeDesc::cuboid(position, half_extents).with_layer(layer);
        desc.tag = tag;
        let shape = world.insert(desc);

        let bounds = Bounds::from_center(position, half_extents);
        let layout = ProbeLayout::new(
            &bounds,
            settings.skin_width,
            settings.horizontal_rays(),
            settings.vertical_rays(),
        );
        Ok(Self {
            shape,
            half_extents,
            slopes_enabled: settings.enable_slopes,
            settings,
            layout,
            collisions: CollisionState::default(),
            previous: CollisionState::default(),
            ignore_descend_angle: false,
            disable_world_collisions: false,
            deferred: Vec::new(),
        })
    }

    #[inline]
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    #[inline]
    pub fn settings(&self) -> &BodySettings {
        &self.settings
    }

    #[inline]
    pub fn layout(&self) -> &ProbeLayout {
        &self.layout
    }

    /// Center of the box.
    pub fn position(&self, world: &CollisionWorld) -> Vec2 {
        world.position(self.shape).unwrap_or_else(Vec2::zeros)
    }

    pub fn bounds(&self, world: &CollisionWorld) -> Bounds {
        Bounds::from_center(self.position(world), self.half_extents)
    }

    pub fn origins(&self, world: &CollisionWorld) -> RaycastOrigins {
        RaycastOrigins::new(&self.bounds(world), self.settings.skin_width)
    }

    #[inline]
    pub fn collisions(&self) -> &CollisionState {
        &self.collisions
    }

    #[inline]
    pub fn collisions_mut(&mut self) -> &mut CollisionState {
        &mut self.collisions
    }

    #[inline]
    pub fn previous_collisions(&self) -> &CollisionState {
        &self.previous
    }

    /// Gravity for this body: its own override or the world default.
    pub fn gravity(&self, config: &Configuration) -> Vec2 {
        self.settings
            .gravity_override()
            .unwrap_or_else(|| config.gravity_vec())
    }

    /// Moves the box by `velocity` without any collision checks.
    pub fn translate(&mut self, world: &mut CollisionWorld, velocity: Vec2) {
        world.translate(self.shape, velocity);
    }

    /// Resolves `velocity` against the world, applies it and updates the
    /// collision state. One call per tick ages the frame counters.
    pub fn move_by(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        velocity: Vec2,
    ) -> MoveOutcome {
        self.resolve(world, config, velocity, true)
    }

    /// Like [`move_by`](Self::move_by), for extra moves inside a tick the body
    /// already counts (platform transport, being pushed). Frame counters are
    /// not aged.
    pub fn carry_by(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        velocity: Vec2,
    ) -> MoveOutcome {
        self.resolve(world, config, velocity, false)
    }

    fn resolve(
        &mut self,
        world: &mut CollisionWorld,
        config: &Configuration,
        velocity: Vec2,
        new_tick: bool,
    ) -> MoveOutcome {
        let saved_layer = world.set_layer(self.shape, CollisionLayer::IGNORE_PROBES);

        self.previous = self.collisions;
        if new_tick {
            self.collisions.reset();
        } else {
            self.collisions.clear();
        }

        let mut velocity = velocity;
        if velocity.x != 0.0 {
            self.collisions.face_dir = sign(velocity.x);
        }

        if !self.disable_world_collisions {
            let origins = self.origins(world);
            if self.slopes_enabled {
                self.follow_slope(world, &origins, &mut velocity);
            }
            self.horizontal_collisions(world, config, &origins, &mut velocity);
            if velocity.y != 0.0 {
                self.vertical_collisions(world, config, &origins, &mut velocity);
            }
        }

        let min = self.settings.min_translation;
        if velocity.x.abs() < min {
            velocity.x = 0.0;
        }
        if velocity.y.abs() < min {
            velocity.y = 0.0;
        }

        world.translate(self.shape, velocity);
        self.collisions.velocity = velocity;
        let contacts = self.collisions.consolidate(&self.previous);

        if let Some(layer) = saved_layer {
            world.set_layer(self.shape, layer);
        }

        MoveOutcome { velocity, contacts }
    }

    fn follow_slope(&mut self, world: &CollisionWorld, origins: &RaycastOrigins, velocity: &mut Vec2) {
        let Some((hit, angle)) = slope::find_slope(
            world,
            origins,
            &self.layout,
            *velocity,
            self.settings.skin_width,
            self.settings.collision_mask,
        ) else {
            return;
        };
        slope::apply_slope(
            &mut self.collisions,
            &self.previous,
            &hit,
            angle,
            *velocity,
            self.settings.skin_width,
        );

        if self.collisions.climbing_slope {
            slope::climb(&mut self.collisions, velocity, self.settings.max_climb_angle);
        } else if self.collisions.descending_slope {
            slope::descend(
                &mut self.collisions,
                velocity,
                self.settings.max_descend_angle,
                self.ignore_descend_angle,
            );
        }
    }

    fn horizontal_collisions(
        &mut self,
        world: &CollisionWorld,
        config: &Configuration,
        origins: &RaycastOrigins,
        velocity: &mut Vec2,
    ) {
        let tags = &config.tags;
        let skin = self.settings.skin_width;
        let dir_x = self.collisions.face_dir;
        let length = velocity.x.abs() + self.settings.horizontal_ray_length;

        for i in 0..self.layout.horizontal_count {
            let Some(hit) = (Probe {
                origin: self.layout.horizontal_origin(origins, dir_x, i),
                direction: Vec2::new(dir_x, 0.0),
                length,
                mask: self.settings.collision_mask,
            })
            .cast(world) else {
                continue;
            };

            // Started inside the shape: nothing sensible to resolve against.
            if hit.distance == 0.0 {
                continue;
            }

            let tag = world.tag(hit.shape);
            if tags.is_one_way_platform(tag) {
                continue;
            }
            if (tags.is_one_way_wall_left(tag) && dir_x < 0.0)
                || (tags.is_one_way_wall_right(tag) && dir_x > 0.0)
            {
                continue;
            }

            self.collisions.side_hits_mut(dir_x).push(hit);

            if hit.surface_angle() <= self.settings.max_climb_angle {
                continue;
            }
            let limit = hit.distance - skin;
            if limit <= velocity.x.abs() {
                velocity.x = limit * dir_x;
                if dir_x < 0.0 {
                    self.collisions.left = true;
                } else {
                    self.collisions.right = true;
                }
            }
        }
    }

    fn vertical_collisions(
        &mut self,
        world: &CollisionWorld,
        config: &Configuration,
        origins: &RaycastOrigins,
        velocity: &mut Vec2,
    ) {
        let tags = &config.tags;
        let dir_y = sign(velocity.y);
        let mut length = velocity.y.abs() + self.settings.vertical_ray_length;

        for i in 0..self.layout.vertical_count {
            let Some(hit) = (Probe {
                origin: self.layout.vertical_origin(origins, dir_y, i, velocity.x),
                direction: Vec2::new(0.0, dir_y),
                length,
                mask: self.settings.collision_mask,
            })
            .cast(world) else {
                continue;
            };

            if hit.distance == 0.0 {
                continue;
            }

            let tag = world.tag(hit.shape);
            if self.collisions.standing_on_platform
                && self.collisions.falling_through_platform
                && tags.is_moving_platform_through(tag)
            {
                continue;
            }
            if tags.is_one_way_wall(tag) {
                continue;
            }
            if (tags.is_one_way_platform_up(tag) && dir_y > 0.0)
                || (tags.is_one_way_platform_down(tag) && dir_y < 0.0)
            {
                continue;
            }

            let resolved = (hit.distance - config.min_distance_to_env) * dir_y;
            if dir_y < 0.0 {
                // Floors snap the body down onto them.
                velocity.y = resolved;
                self.collisions.below = true;
            } else if resolved <= velocity.y {
                velocity.y = resolved;
                self.collisions.above = true;
            } else {
                continue;
            }
            length = hit.distance;
        }
    }

    /// Ground under the bottom-left corner, within `factor` skin widths.
    pub fn is_ground_on_left(&self, world: &mut CollisionWorld, factor: f32) -> bool {
        let origin = self.origins(world).bottom_left;
        self.probe_down(world, origin, factor)
    }

    /// Ground under the bottom-right corner, within `factor` skin widths.
    pub fn is_ground_on_right(&self, world: &mut CollisionWorld, factor: f32) -> bool {
        let origin = self.origins(world).bottom_right;
        self.probe_down(world, origin, factor)
    }

    fn probe_down(&self, world: &mut CollisionWorld, origin: Vec2, factor: f32) -> bool {
        let saved = world.set_layer(self.shape, CollisionLayer::IGNORE_PROBES);
        let hit = Probe {
            origin,
            direction: Vec2::new(0.0, -1.0),
            length: self.settings.skin_width * factor,
            mask: self.settings.collision_mask,
        }
        .cast(world);
        if let Some(layer) = saved {
            world.set_layer(self.shape, layer);
        }
        hit.is_some()
    }

    /// Downhill direction of the active slope; zero when there is none.
    pub fn down_slope_dir(&self) -> Vec2 {
        if self.collisions.slope_angle == 0.0 {
            return Vec2::zeros();
        }
        slope::down_slope_dir(self.collisions.slope_normal)
    }

    /// Within `grace_frames` of the last ground contact.
    pub fn is_on_ground(&self, grace_frames: u32) -> bool {
        self.collisions.is_on_ground(grace_frames)
    }

    #[inline]
    pub fn slopes_enabled(&self) -> bool {
        self.slopes_enabled
    }

    /// Turns slope handling off and asks for it back after `reset_delay`
    /// seconds.
    pub fn disable_slopes(&mut self, reset_delay: f32) {
        self.slopes_enabled = false;
        self.deferred.push(DeferredEffect {
            effect: BodyEffect::EnableSlopes,
            delay: reset_delay,
        });
    }

    pub fn enable_slopes(&mut self) {
        self.slopes_enabled = true;
    }

    /// Starts dropping through pass-through platforms for `reset_delay`
    /// seconds. Returns false if already dropping.
    pub fn fall_through_platform(&mut self, reset_delay: f32) -> bool {
        if self.collisions.falling_through_platform {
            return false;
        }
        self.collisions.falling_through_platform = true;
        self.deferred.push(DeferredEffect {
            effect: BodyEffect::ResetFallThrough,
            delay: reset_delay,
        });
        true
    }

    pub fn reset_falling_through_platform(&mut self) {
        self.collisions.falling_through_platform = false;
    }

    /// Runs an effect that was scheduled earlier.
    pub fn apply_effect(&mut self, effect: BodyEffect) {
        match effect {
            BodyEffect::EnableSlopes => self.enable_slopes(),
            BodyEffect::ResetFallThrough => self.reset_falling_through_platform(),
        }
    }

    /// Takes the effects requested since the last call.
    pub fn drain_deferred(&mut self) -> Vec<DeferredEffect> {
        std::mem::take(&mut self.deferred)
    }
}
