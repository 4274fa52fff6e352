//! Slope detection and slope-following velocity adjustments.
//!
//! A slope is any surface whose angle from up lies strictly between 0 and 90
//! degrees (with [`SLOPE_ANGLE_EPS`] of slack on both ends). Flat floors and
//! vertical walls are never slopes.

use super::probe::{Probe, ProbeLayout, RaycastOrigins};
use super::state::CollisionState;
use super::types::{LayerMask, ProbeHit, Vec2, sign};
use super::world::CollisionWorld;
use crate::constants::SLOPE_ANGLE_EPS;

/// True when `angle` (degrees) counts as a slope.
#[inline]
pub fn is_slope_angle(angle: f32) -> bool {
    angle > SLOPE_ANGLE_EPS && angle < 90.0 - SLOPE_ANGLE_EPS
}

/// Downhill direction along a surface with the given normal.
#[inline]
pub fn down_slope_dir(normal: Vec2) -> Vec2 {
    Vec2::new(sign(normal.x) * normal.y, -normal.x.abs())
}

/// Picks the steepest slope under or beside the body.
///
/// Casts the whole bottom row downward (length `|v.y| + skin`) plus one probe
/// from each bottom corner sideways (length `|v.x| + skin`).
pub fn find_slope(
    world: &CollisionWorld,
    origins: &RaycastOrigins,
    layout: &ProbeLayout,
    velocity: Vec2,
    skin_width: f32,
    mask: LayerMask,
) -> Option<(ProbeHit, f32)> {
    let mut best: Option<(ProbeHit, f32)> = None;
    let mut consider = |hit: Option<ProbeHit>| {
        let Some(hit) = hit.filter(|h| h.distance > 0.0) else {
            return;
        };
        let angle = hit.surface_angle();
        if !is_slope_angle(angle) {
            return;
        }
        if best.is_none_or(|(_, a)| angle > a) {
            best = Some((hit, angle));
        }
    };

    let down = Vec2::new(0.0, -1.0);
    let below_len = velocity.y.abs() + skin_width;
    for i in 0..layout.vertical_count {
        let origin = layout.vertical_origin(origins, -1.0, i, 0.0);
        consider(
            Probe {
                origin,
                direction: down,
                length: below_len,
                mask,
            }
            .cast(world),
        );
    }

    let side_len = velocity.x.abs() + skin_width;
    consider(
        Probe {
            origin: origins.bottom_right,
            direction: Vec2::new(1.0, 0.0),
            length: side_len,
            mask,
        }
        .cast(world),
    );
    consider(
        Probe {
            origin: origins.bottom_left,
            direction: Vec2::new(-1.0, 0.0),
            length: side_len,
            mask,
        }
        .cast(world),
    );

    best
}

/// Records `slope` as the active slope and classifies climbing/descending
/// against the horizontal velocity.
pub fn apply_slope(
    state: &mut CollisionState,
    previous: &CollisionState,
    hit: &ProbeHit,
    angle: f32,
    velocity: Vec2,
    skin_width: f32,
) {
    state.slope_angle = angle;
    state.slope_normal = hit.normal;
    if angle > previous.slope_angle + SLOPE_ANGLE_EPS {
        state.distance_to_slope_start = hit.distance - skin_width;
    }
    if velocity.x != 0.0 {
        let uphill = sign(-hit.normal.x);
        state.climbing_slope = uphill == sign(velocity.x);
        state.descending_slope = !state.climbing_slope;
    }
}

/// Turns horizontal motion into motion along the slope being climbed.
pub fn climb(state: &mut CollisionState, velocity: &mut Vec2, max_climb_angle: f32) {
    let angle = state.slope_angle;
    if angle > max_climb_angle {
        velocity.x = 0.0;
        return;
    }
    let lead = state.distance_to_slope_start * state.face_dir;
    velocity.x -= lead;

    let move_distance = velocity.x.abs();
    let climb_y = angle.to_radians().sin() * move_distance;
    if velocity.y <= climb_y {
        velocity.y = climb_y;
        velocity.x = angle.to_radians().cos() * move_distance * sign(velocity.x);
        state.below = true;
    }

    velocity.x += lead;
}

/// Sticks the body to the slope it is walking down.
pub fn descend(
    state: &mut CollisionState,
    velocity: &mut Vec2,
    max_descend_angle: f32,
    ignore_descend_angle: bool,
) {
    if velocity.y > 0.0 {
        return;
    }
    if state.slope_angle <= max_descend_angle || ignore_descend_angle {
        velocity.y = velocity.x.abs() * down_slope_dir(state.slope_normal).y;
        state.below = true;
    }
}
