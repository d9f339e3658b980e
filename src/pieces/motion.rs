//! Damped-spring interpolation.

use crate::core::Vec3;

/// Move `current` toward `target` like a critically damped spring.
///
/// `smooth_time` is roughly the time to reach the target, `max_speed` caps
/// how fast the piece may go, and `velocity` carries state between calls.
/// The result never overshoots: if a step would pass the target it lands
/// exactly on it and the velocity is zeroed.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = (current - target).clamp_length(max_speed * smooth_time);
    let clamped_target = current - change;

    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * decay;
    let output = clamped_target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }
    output
}
