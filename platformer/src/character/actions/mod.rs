//! Built-in character actions.

pub mod ground_movement;
pub mod push;

pub use ground_movement::GroundMovement;
pub use push::Push;
