/*!
Core collision types and math aliases shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between the
collision world, the probe caster, the collision state and the kinematic body.

Notes
- Y is up. Angles are in degrees and measured from the up vector.
- Layers are bit indices in `0..32`; a [`LayerMask`] is a set of layers.
*/

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Common math alias for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;

/// World up.
#[inline]
pub fn up() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// Sign with zero mapped to zero, unlike `f32::signum`.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unsigned angle in degrees between two vectors.
#[inline]
pub fn angle_deg(a: Vec2, b: Vec2) -> f32 {
    let denom = a.norm() * b.norm();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Stable identity of a shape registered in the collision world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u32);

/// Index of a single collision layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u8);

impl CollisionLayer {
    /// Shapes on this layer are never hit by any probe.
    pub const IGNORE_PROBES: CollisionLayer = CollisionLayer(2);
    /// Level geometry and anything not otherwise placed.
    pub const DEFAULT: CollisionLayer = CollisionLayer(0);
    /// Character bodies, boxes included.
    pub const CHARACTERS: CollisionLayer = CollisionLayer(1);
}

/// A set of collision layers a probe is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const fn single(layer: CollisionLayer) -> Self {
        LayerMask(1u32 << (layer.0 & 31))
    }

    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        LayerMask(layers.iter().fold(0, |acc, l| acc | (1u32 << (l.0 & 31))))
    }

    #[inline]
    pub fn contains(&self, layer: CollisionLayer) -> bool {
        layer.0 < 32 && (self.0 & (1u32 << layer.0)) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    #[inline]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Shrinks every side by `amount`.
    #[inline]
    pub fn inset(&self, amount: f32) -> Self {
        let d = Vec2::new(amount, amount);
        Self {
            min: self.min + d,
            max: self.max - d,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// The nearest qualifying hit of a single probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Shape that was hit.
    pub shape: ShapeId,
    /// Distance from the probe origin along its direction (>= 0).
    pub distance: f32,
    /// Outward surface normal at the hit point.
    pub normal: Vec2,
    /// World-space hit point.
    pub point: Vec2,
}

impl ProbeHit {
    /// Angle of the hit surface from up, in degrees.
    #[inline]
    pub fn surface_angle(&self) -> f32 {
        angle_deg(self.normal, up())
    }
}
