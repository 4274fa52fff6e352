//! Setup errors.
//!
//! Only construction and wiring can fail. Once a body, platform or character
//! exists, ticking it never returns an error.

use thiserror::Error;

/// Errors raised while building simulation objects.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    /// An action depends on a sibling action that is not registered
    #[error("action `{action}` requires action `{requires}` on the same character")]
    MissingAction {
        action: &'static str,
        requires: &'static str,
    },

    /// A moving platform path needs at least two waypoints
    #[error("moving platform needs at least 2 waypoints, got {0}")]
    NotEnoughWaypoints(usize),

    /// Box half extents must be strictly positive
    #[error("invalid half extents ({0}, {1})")]
    InvalidExtents(f32, f32),
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;
