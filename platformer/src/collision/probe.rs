//! Probe caster: origins and spacing derived from a body's box.
//!
//! A body's box is inset by its skin width; the four corners of the inset box
//! are the probe origins. Each side gets a row of evenly spaced probes that
//! starts at a corner and ends at the opposite corner.

use super::types::{Bounds, LayerMask, ProbeHit, Vec2};
use super::world::CollisionWorld;
use crate::constants::MIN_RAY_COUNT;

/// Corners of a box inset by the skin width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastOrigins {
    pub fn new(bounds: &Bounds, skin_width: f32) -> Self {
        let inner = bounds.inset(skin_width);
        Self {
            top_left: Vec2::new(inner.min.x, inner.max.y),
            top_right: Vec2::new(inner.max.x, inner.max.y),
            bottom_left: Vec2::new(inner.min.x, inner.min.y),
            bottom_right: Vec2::new(inner.max.x, inner.min.y),
        }
    }
}

/// Probe counts and spacing for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeLayout {
    /// Probes on the left and right sides.
    pub horizontal_count: u32,
    /// Probes on the top and bottom sides.
    pub vertical_count: u32,
    /// Distance between two horizontal probes (along Y).
    pub horizontal_spacing: f32,
    /// Distance between two vertical probes (along X).
    pub vertical_spacing: f32,
}

impl ProbeLayout {
    pub fn new(bounds: &Bounds, skin_width: f32, horizontal_count: u32, vertical_count: u32) -> Self {
        let size = bounds.inset(skin_width).size();
        let horizontal_count = horizontal_count.max(MIN_RAY_COUNT);
        let vertical_count = vertical_count.max(MIN_RAY_COUNT);
        Self {
            horizontal_count,
            vertical_count,
            horizontal_spacing: size.y / (horizontal_count - 1) as f32,
            vertical_spacing: size.x / (vertical_count - 1) as f32,
        }
    }

    /// Origin of the `i`-th probe on the left (`dir_x < 0`) or right side.
    #[inline]
    pub fn horizontal_origin(&self, origins: &RaycastOrigins, dir_x: f32, i: u32) -> Vec2 {
        let base = if dir_x < 0.0 {
            origins.bottom_left
        } else {
            origins.bottom_right
        };
        base + Vec2::new(0.0, self.horizontal_spacing * i as f32)
    }

    /// Origin of the `i`-th probe on the bottom (`dir_y < 0`) or top side,
    /// shifted along X by `offset_x`.
    #[inline]
    pub fn vertical_origin(&self, origins: &RaycastOrigins, dir_y: f32, i: u32, offset_x: f32) -> Vec2 {
        let base = if dir_y < 0.0 {
            origins.bottom_left
        } else {
            origins.top_left
        };
        base + Vec2::new(self.vertical_spacing * i as f32 + offset_x, 0.0)
    }
}

/// A single probe query.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub origin: Vec2,
    pub direction: Vec2,
    pub length: f32,
    pub mask: LayerMask,
}

impl Probe {
    /// Casts the probe. A miss is the normal outcome.
    #[inline]
    pub fn cast(&self, world: &CollisionWorld) -> Option<ProbeHit> {
        world.cast_ray(self.origin, self.direction, self.length, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corners_are_inset() {
        let bounds = Bounds::from_center(Vec2::new(0.0, 1.0), Vec2::new(0.5, 1.0));
        let o = RaycastOrigins::new(&bounds, 0.25);
        assert_relative_eq!(o.bottom_left.x, -0.25);
        assert_relative_eq!(o.bottom_left.y, 0.25);
        assert_relative_eq!(o.top_right.x, 0.25);
        assert_relative_eq!(o.top_right.y, 1.75);
    }

    #[test]
    fn rows_span_corner_to_corner() {
        let bounds = Bounds::from_center(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let layout = ProbeLayout::new(&bounds, 0.0, 3, 5);
        let o = RaycastOrigins::new(&bounds, 0.0);

        assert_eq!(layout.horizontal_origin(&o, 1.0, 2), o.top_right);
        assert_eq!(layout.vertical_origin(&o, -1.0, 4, 0.0), o.bottom_right);
        assert_eq!(layout.vertical_origin(&o, 1.0, 0, 0.25), o.top_left + Vec2::new(0.25, 0.0));
    }

    #[test]
    fn counts_never_drop_below_two() {
        let bounds = Bounds::from_center(Vec2::zeros(), Vec2::new(1.0, 1.0));
        let layout = ProbeLayout::new(&bounds, 0.0, 0, 1);
        assert_eq!(layout.horizontal_count, 2);
        assert_eq!(layout.vertical_count, 2);
        assert_eq!(layout.vertical_spacing, 2.0);
    }
}
