//! Collision world: the set of 2D shapes probes are cast against.
//!
//! Shapes are parry shapes (through `rapier2d`) placed at a world position and
//! rotation, each carrying a collision layer and an optional tag. Bodies and
//! platforms register their own box here so that other bodies can hit them.
//!
//! Design notes
//! - Deterministic: shapes are tested in registration order and the strictly
//!   nearest hit wins, so ties go to the shape registered first.
//! - No broad phase. Scenes are small and every probe is a single ray.
//! - Shapes are never removed; a shape can be parked on
//!   [`CollisionLayer::IGNORE_PROBES`] to take it out of every query.

// Re-export so callers can build custom shapes without depending on `rapier2d`
// directly.
pub use rapier2d;

use rapier2d::math::{Isometry, Point, Real, Vector};
use rapier2d::parry::query::{Ray, RayCast};
use rapier2d::parry::shape::SharedShape;

use super::types::{CollisionLayer, LayerMask, ProbeHit, ShapeId, Vec2};

/// Supported world shapes, in local space.
///
/// Keep this intentionally small; use [`ShapeDef::Custom`] for anything else.
#[derive(Clone)]
pub enum ShapeDef {
    /// Box with the given half extents.
    Cuboid { half_extents: Vec2 },
    /// Line segment between two local points. Useful for slopes and one-way ledges.
    Segment { a: Vec2, b: Vec2 },
    /// Solid triangle, e.g. a ramp.
    Triangle { a: Vec2, b: Vec2, c: Vec2 },
    Ball { radius: f32 },
    Custom(SharedShape),
}

impl std::fmt::Debug for ShapeDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeDef::Cuboid { half_extents } => f
                .debug_struct("Cuboid")
                .field("half_extents", half_extents)
                .finish(),
            ShapeDef::Segment { a, b } => f.debug_struct("Segment").field("a", a).field("b", b).finish(),
            ShapeDef::Triangle { a, b, c } => f
                .debug_struct("Triangle")
                .field("a", a)
                .field("b", b)
                .field("c", c)
                .finish(),
            ShapeDef::Ball { radius } => f.debug_struct("Ball").field("radius", radius).finish(),
            ShapeDef::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[inline]
fn point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

impl ShapeDef {
    fn into_shared(self) -> SharedShape {
        match self {
            ShapeDef::Cuboid { half_extents } => SharedShape::cuboid(half_extents.x, half_extents.y),
            ShapeDef::Segment { a, b } => SharedShape::segment(point(a), point(b)),
            ShapeDef::Triangle { a, b, c } => SharedShape::triangle(point(a), point(b), point(c)),
            ShapeDef::Ball { radius } => SharedShape::ball(radius),
            ShapeDef::Custom(shape) => shape,
        }
    }
}

/// Everything needed to register a shape.
#[derive(Debug, Clone)]
pub struct ShapeDesc {
    pub shape: ShapeDef,
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub layer: CollisionLayer,
    pub tag: Option<String>,
}

impl ShapeDesc {
    pub fn new(shape: ShapeDef, position: Vec2) -> Self {
        Self {
            shape,
            position,
            rotation: 0.0,
            layer: CollisionLayer::DEFAULT,
            tag: None,
        }
    }

    pub fn cuboid(position: Vec2, half_extents: Vec2) -> Self {
        Self::new(ShapeDef::Cuboid { half_extents }, position)
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

struct WorldShape {
    shape: SharedShape,
    position: Vec2,
    rotation: f32,
    layer: CollisionLayer,
    tag: Option<String>,
}

impl WorldShape {
    #[inline]
    fn iso(&self) -> Isometry<Real> {
        Isometry::new(Vector::new(self.position.x, self.position.y), self.rotation)
    }
}

#[derive(Default)]
pub struct CollisionWorld {
    shapes: Vec<WorldShape>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shape and returns its identity.
    pub fn insert(&mut self, desc: ShapeDesc) -> ShapeId {
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(WorldShape {
            shape: desc.shape.into_shared(),
            position: desc.position,
            rotation: desc.rotation,
            layer: desc.layer,
            tag: desc.tag,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    fn get(&self, id: ShapeId) -> Option<&WorldShape> {
        self.shapes.get(id.0 as usize)
    }

    #[inline]
    fn get_mut(&mut self, id: ShapeId) -> Option<&mut WorldShape> {
        self.shapes.get_mut(id.0 as usize)
    }

    pub fn position(&self, id: ShapeId) -> Option<Vec2> {
        self.get(id).map(|s| s.position)
    }

    pub fn set_position(&mut self, id: ShapeId, position: Vec2) {
        if let Some(s) = self.get_mut(id) {
            s.position = position;
        }
    }

    /// Moves a shape without any collision checks.
    pub fn translate(&mut self, id: ShapeId, delta: Vec2) {
        if let Some(s) = self.get_mut(id) {
            s.position += delta;
        }
    }

    pub fn layer(&self, id: ShapeId) -> Option<CollisionLayer> {
        self.get(id).map(|s| s.layer)
    }

    /// Changes a shape's layer and returns the previous one.
    pub fn set_layer(&mut self, id: ShapeId, layer: CollisionLayer) -> Option<CollisionLayer> {
        let s = self.get_mut(id)?;
        Some(std::mem::replace(&mut s.layer, layer))
    }

    pub fn tag(&self, id: ShapeId) -> Option<&str> {
        self.get(id).and_then(|s| s.tag.as_deref())
    }

    pub fn set_tag(&mut self, id: ShapeId, tag: Option<String>) {
        if let Some(s) = self.get_mut(id) {
            s.tag = tag;
        }
    }

    /// Casts a ray and returns the nearest hit on a shape whose layer is in
    /// `mask`.
    ///
    /// The ray is solid: an origin inside a shape hits it at distance 0.
    /// Returns `None` for a zero direction or a non-positive length.
    pub fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        length: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        if !(length > 0.0) {
            return None;
        }
        let dir = direction.try_normalize(f32::EPSILON)?;
        let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));

        let mut best: Option<ProbeHit> = None;
        for (index, entry) in self.shapes.iter().enumerate() {
            if entry.layer == CollisionLayer::IGNORE_PROBES || !mask.contains(entry.layer) {
                continue;
            }
            let Some(hit) = entry
                .shape
                .cast_ray_and_get_normal(&entry.iso(), &ray, length, true)
            else {
                continue;
            };
            let distance = hit.time_of_impact;
            if best.is_some_and(|b| distance >= b.distance) {
                continue;
            }
            best = Some(ProbeHit {
                shape: ShapeId(index as u32),
                distance,
                normal: Vec2::new(hit.normal.x, hit.normal.y),
                point: origin + dir * distance,
            });
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_world() -> (CollisionWorld, ShapeId) {
        let mut world = CollisionWorld::new();
        let floor = world.insert(ShapeDesc::cuboid(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5)));
        (world, floor)
    }

    #[test]
    fn ray_hits_floor_top() {
        let (world, floor) = floor_world();
        let hit = world
            .cast_ray(Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0), 5.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.shape, floor);
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn ray_respects_length_and_mask() {
        let (world, _) = floor_world();
        let down = Vec2::new(0.0, -1.0);
        assert!(world.cast_ray(Vec2::new(0.0, 1.0), down, 0.5, LayerMask::ALL).is_none());
        assert!(world.cast_ray(Vec2::new(0.0, 1.0), down, 5.0, LayerMask::NONE).is_none());
        assert!(world.cast_ray(Vec2::new(0.0, 1.0), Vec2::zeros(), 5.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn ignored_layer_is_invisible() {
        let (mut world, floor) = floor_world();
        let previous = world.set_layer(floor, CollisionLayer::IGNORE_PROBES);
        assert_eq!(previous, Some(CollisionLayer::DEFAULT));
        assert!(world
            .cast_ray(Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0), 5.0, LayerMask::ALL)
            .is_none());
    }

    #[test]
    fn nearest_shape_wins() {
        let (mut world, _) = floor_world();
        let ledge = world.insert(
            ShapeDesc::cuboid(Vec2::new(0.0, 2.0), Vec2::new(1.0, 0.25)).with_tag("OneWayPlatformUp"),
        );
        let hit = world
            .cast_ray(Vec2::new(0.0, 5.0), Vec2::new(0.0, -1.0), 10.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.shape, ledge);
        assert_relative_eq!(hit.distance, 2.75, epsilon = 1e-5);
        assert_eq!(world.tag(ledge), Some("OneWayPlatformUp"));
    }

    #[test]
    fn translate_moves_the_shape() {
        let (mut world, floor) = floor_world();
        world.translate(floor, Vec2::new(0.0, 1.0));
        let hit = world
            .cast_ray(Vec2::new(0.0, 2.0), Vec2::new(0.0, -1.0), 5.0, LayerMask::ALL)
            .unwrap();
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-5);
    }
}
