//! Passenger detection for moving platforms.
//!
//! Rebuilt from scratch every tick out of three probe passes over the
//! platform's displacement. A rider found by more than one pass keeps the
//! entry of the first pass that found it.
//!
//! Notes
//! - Riders carried upward, or pushed sideways, are moved before the platform so
//!   the platform never starts the tick overlapping them.
//! - Riders on top of a platform moving down or sideways are moved after it, so
//!   their own downward probes find the platform where it ended up.

use std::collections::BTreeSet;

use crate::collision::probe::{Probe, ProbeLayout, RaycastOrigins};
use crate::collision::types::{LayerMask, ProbeHit, ShapeId, Vec2, sign};
use crate::collision::world::CollisionWorld;

/// How one rider moves with the platform this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerMovement {
    pub rider: ShapeId,
    /// Displacement to apply to the rider.
    pub velocity: Vec2,
    /// The rider stands on the platform (and counts as grounded).
    pub standing_on_platform: bool,
    /// Move the rider before the platform translates.
    pub move_before_platform: bool,
}

/// Probe geometry of the platform for this tick.
pub struct PassengerProbe<'a> {
    pub world: &'a CollisionWorld,
    pub origins: &'a RaycastOrigins,
    pub layout: &'a ProbeLayout,
    pub skin_width: f32,
    pub min_distance_to_env: f32,
    pub mask: LayerMask,
}

impl PassengerProbe<'_> {
    fn cast(&self, origin: Vec2, direction: Vec2, length: f32) -> Option<ProbeHit> {
        Probe {
            origin,
            direction,
            length,
            mask: self.mask,
        }
        .cast(self.world)
        .filter(|hit| hit.distance > 0.0)
    }
}

/// Finds every rider moved by a platform displacing by `velocity`.
pub fn find_passengers(probe: &PassengerProbe<'_>, velocity: Vec2) -> Vec<PassengerMovement> {
    let mut seen = BTreeSet::new();
    let mut moves = Vec::new();
    let dir_x = sign(velocity.x);
    let dir_y = sign(velocity.y);
    let skin = probe.skin_width;

    // Riders on top of a platform moving down or purely sideways.
    if dir_y == -1.0 || (velocity.y == 0.0 && velocity.x != 0.0) {
        let length = skin * 2.0 + probe.min_distance_to_env;
        for i in 0..probe.layout.vertical_count {
            let origin = probe.layout.vertical_origin(probe.origins, 1.0, i, 0.0);
            let Some(hit) = probe.cast(origin, Vec2::new(0.0, 1.0), length) else {
                continue;
            };
            if seen.insert(hit.shape) {
                moves.push(PassengerMovement {
                    rider: hit.shape,
                    velocity,
                    standing_on_platform: true,
                    move_before_platform: false,
                });
            }
        }
    }

    // Vertically moving platform: riders above when rising, below when sinking.
    if velocity.y != 0.0 {
        let length = velocity.y.abs() + skin + probe.min_distance_to_env;
        for i in 0..probe.layout.vertical_count {
            let origin = probe.layout.vertical_origin(probe.origins, dir_y, i, 0.0);
            let Some(hit) = probe.cast(origin, Vec2::new(0.0, dir_y), length) else {
                continue;
            };
            if seen.insert(hit.shape) {
                let push_x = if dir_y == 1.0 { velocity.x } else { 0.0 };
                let push_y = velocity.y - (hit.distance - skin) * dir_y;
                moves.push(PassengerMovement {
                    rider: hit.shape,
                    velocity: Vec2::new(push_x, push_y),
                    standing_on_platform: dir_y == 1.0,
                    move_before_platform: true,
                });
            }
        }
    }

    // Horizontally moving platform: riders in front get pushed.
    if velocity.x != 0.0 {
        let length = velocity.x.abs() + skin + probe.min_distance_to_env;
        for i in 0..probe.layout.horizontal_count {
            let origin = probe.layout.horizontal_origin(probe.origins, dir_x, i);
            let Some(hit) = probe.cast(origin, Vec2::new(dir_x, 0.0), length) else {
                continue;
            };
            if seen.insert(hit.shape) {
                let push_x = velocity.x - (hit.distance - skin) * dir_x;
                moves.push(PassengerMovement {
                    rider: hit.shape,
                    velocity: Vec2::new(push_x, -skin),
                    standing_on_platform: false,
                    move_before_platform: true,
                });
            }
        }
    }

    moves
}

/// Riders that left and riders present, against last tick's set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiderDiff {
    pub departed: Vec<ShapeId>,
    pub present: Vec<ShapeId>,
}

/// Diffs this tick's riders against `previous` and replaces it.
pub fn diff_riders(previous: &mut BTreeSet<ShapeId>, moves: &[PassengerMovement]) -> RiderDiff {
    let current: BTreeSet<ShapeId> = moves.iter().map(|m| m.rider).collect();
    let departed = previous.difference(&current).copied().collect();
    let present = current.iter().copied().collect();
    *previous = current;
    RiderDiff { departed, present }
}
