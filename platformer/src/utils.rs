/// Critically damped approach of `current` towards `target`.
///
/// `velocity` carries the rate of change between calls and must be kept by
/// the caller. `smooth_time` is roughly the time to reach the target; it is
/// clamped away from zero.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    const MIN_SMOOTH_TIME: f32 = 1.0e-4;

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Never overshoot the target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut velocity = 0.0;
        let mut x = 0.0;
        for _ in 0..120 {
            x = smooth_damp(x, 6.0, &mut velocity, 0.1, DT);
            assert!(x <= 6.0);
        }
        assert!((x - 6.0).abs() < 1.0e-3);
    }

    #[test]
    fn smooth_damp_handles_negative_targets() {
        let mut velocity = 0.0;
        let x = smooth_damp(0.0, -6.0, &mut velocity, 0.1, DT);
        assert!(x < 0.0 && x > -6.0);
        assert!(velocity < 0.0);
    }
}
