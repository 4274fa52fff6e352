/*!
Collision root module.

Raycast-based kinematic movement for axis-aligned boxes in 2D. The code is
split for clarity:

- types:     shared data types (Vec2, Bounds, ProbeHit, layers)
- settings:  per-body tunables
- world:     the shape set probes are cast against (parry shapes via rapier2d)
- probe:     probe origins, spacing and single-probe casts
- state:     per-body contact flags, side hits and edge detection
- slope:     slope detection, climbing and descending
- kinematic: the body and its `move_by` resolution passes
*/

pub mod kinematic;
pub mod probe;
pub mod settings;
pub mod slope;
pub mod state;
pub mod types;
pub mod world;

// Re-export commonly used types.
pub use kinematic::{BodyEffect, DeferredEffect, KinematicBody, MoveOutcome};
pub use probe::{Probe, ProbeLayout, RaycastOrigins};
pub use settings::BodySettings;
pub use state::{CollisionState, FramesSince, SideHits};
pub use types::{Bounds, CollisionLayer, LayerMask, ProbeHit, ShapeId, Vec2};
pub use world::{CollisionWorld, ShapeDef, ShapeDesc};
