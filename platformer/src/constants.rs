/*!
Default tunables for bodies, characters and platforms.

Distances are in world units, angles in degrees and durations in seconds.
Durations are converted to tick counts once, at construction, through
[`crate::timer::frames_for`].
*/

/// Inset margin between a body's box and its probe origins.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Probes cast per side along each axis. Never fewer than [`MIN_RAY_COUNT`].
pub const DEFAULT_RAY_COUNT: u32 = 4;

/// Two probes, one per corner, is the smallest layout that spans an edge.
pub const MIN_RAY_COUNT: u32 = 2;

/// Steepest surface a body walks up. Anything steeper is a wall.
pub const DEFAULT_MAX_CLIMB_ANGLE: f32 = 45.0;

/// Steepest surface a body sticks to when walking down.
pub const DEFAULT_MAX_DESCEND_ANGLE: f32 = 45.0;

/// Extra probe length added to the horizontal displacement.
pub const DEFAULT_HORIZONTAL_RAY_LENGTH: f32 = 0.2;

/// Extra probe length added to the vertical displacement.
pub const DEFAULT_VERTICAL_RAY_LENGTH: f32 = 0.2;

/// Resolved displacement components smaller than this are snapped to zero.
pub const DEFAULT_MIN_TRANSLATION: f32 = 0.01;

/// Maximum number of recorded contact hits per side and move.
pub const MAX_SIDE_HITS: usize = 3;

/// Angles closer than this to 0 or 90 degrees are not slopes.
pub const SLOPE_ANGLE_EPS: f32 = 0.01;

/// Default world gravity (units per second squared).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -50.0];

/// Default fixed tick length (seconds).
pub const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;

/// Time without ground contact, while descending, before a character falls.
pub const DEFAULT_FALLING_TIME: f32 = 0.1;

/// Time a character keeps ground membership after losing contact.
pub const DEFAULT_GROUND_GRACE_TIME: f32 = 0.05;

/// Character velocity components smaller than this are snapped to zero.
pub const DEFAULT_MIN_VELOCITY: f32 = 0.05;

/// Slope handling stays disabled this long after a jump starts.
pub const JUMP_SLOPE_GRACE_TIME: f32 = 0.1;

/// Default delay before re-enabling slopes / resetting platform fall-through.
pub const DEFAULT_BODY_EFFECT_DELAY: f32 = 0.5;

/// Default moving platform speed (units per second).
pub const DEFAULT_PLATFORM_SPEED: f32 = 2.0;

/// Valid range of the platform ease amount.
pub const MAX_EASE_AMOUNT: f32 = 2.0;

/// Segments shorter than this are considered already traversed.
pub const MIN_SEGMENT_LENGTH: f32 = 1.0e-6;
