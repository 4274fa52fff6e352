//! Input sources.
//!
//! Characters only ever ask for a horizontal axis. Reading devices is someone
//! else's job; this crate just needs a value in `[-1, 1]` each tick.

/// Supplies a horizontal input axis.
pub trait InputSource {
    /// Horizontal axis. Values outside `[-1, 1]` are clamped by the caller.
    fn axis_x(&self) -> f32;
}

/// No input at all. Boxes and scripted characters use this.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralInput;

impl InputSource for NeutralInput {
    fn axis_x(&self) -> f32 {
        0.0
    }
}

/// A constant axis value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedAxis(pub f32);

impl InputSource for FixedAxis {
    fn axis_x(&self) -> f32 {
        self.0
    }
}

/// Reads the axis from a source and clamps it into `[-1, 1]`.
#[inline]
pub fn clamped_axis(source: &dyn InputSource) -> f32 {
    let x = source.axis_x();
    if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) }
}
