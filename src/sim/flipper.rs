//! Flipper actuation
//!
//! Flippers are driven kinematically: the angle chases the input target at a
//! bounded rate, and the angular velocity handed to the collision code is
//! just the angle change over the frame.

use super::state::Flipper;

/// Move `flipper` toward its target angle by at most `max_speed * dt`.
///
/// Snaps onto the target once it is within one step, then derives
/// `angular_vel` clamped to `±max_angular_vel`. A `dt` at or below
/// `f32::EPSILON` leaves the angle alone and zeroes the angular velocity.
pub fn advance(flipper: &mut Flipper, dt: f32, max_speed: f32, max_angular_vel: f32) {
    if dt <= f32::EPSILON {
        flipper.angular_vel = 0.0;
        return;
    }

    let previous = flipper.current_angle;
    let diff = flipper.target_angle - flipper.current_angle;
    let step = max_speed * dt;

    if diff.abs() < step {
        flipper.current_angle = flipper.target_angle;
    } else {
        flipper.current_angle += step.copysign(diff);
    }

    flipper.angular_vel =
        ((flipper.current_angle - previous) / dt).clamp(-max_angular_vel, max_angular_vel);
}
