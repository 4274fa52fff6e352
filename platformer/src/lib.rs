pub mod bitmask_flags;
pub mod character;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod input;
pub mod platform;
pub mod sim;
pub mod timer;
pub mod utils;

pub use bitmask_flags::{BitmaskFlags, FlagBitmask};
pub use character::actions::{GroundMovement, Push};
pub use character::{
    Area, AreaSet, Character, CharacterAction, CharacterBuilder, CharacterId, CharacterSettings,
    CharacterState, StateSet,
};
pub use collision::{
    BodySettings, CollisionLayer, CollisionState, CollisionWorld, KinematicBody, LayerMask,
    ProbeHit, ShapeDef, ShapeDesc, ShapeId, Vec2,
};
pub use config::{Configuration, TagConfig};
pub use error::{Result, SetupError};
pub use events::{CharacterEvent, ContactEvent, PlatformEvent, SimEvent};
pub use input::{FixedAxis, InputSource, NeutralInput};
pub use platform::{
    MovingPlatform, PlatformCommand, PlatformDesc, PlatformId, PlatformSettings,
};
pub use sim::Simulation;
