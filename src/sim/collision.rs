//! Collision detection and response
//!
//! Every check works on the ball's already-integrated position and corrects
//! it in place. There is no sub-stepping: a fast ball can tunnel through a
//! flipper, same as the table has always played.

use glam::Vec2;

use super::geom::{clamp_length, reflect, try_normalize};
use super::state::{Ball, Flipper, Obstacle, Wall};
use crate::consts::*;

/// Outcome of a ball/flipper check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipperContact {
    /// Ball centre is outside the flipper body
    Miss,
    /// Ball bounced; carries the contact normal
    Hit { normal: Vec2 },
    /// Ball is on the flipper but the response came out non-finite and was discarded
    Rejected,
}

impl FlipperContact {
    /// True only when the ball actually bounced
    pub fn is_hit(&self) -> bool {
        matches!(self, FlipperContact::Hit { .. })
    }
}

/// Whether a world point lies inside the flipper's local-space rectangle
pub fn flipper_contains(flipper: &Flipper, point: Vec2, half_height: f32) -> bool {
    let local = flipper.to_local(point);
    let (x_min, x_max) = flipper.local_x_range();
    local.x >= x_min && local.x <= x_max && local.y >= -half_height && local.y <= half_height
}

/// Surface velocity of the flipper at `rel` (offset from the pivot), capped
/// at `max_speed`
#[inline]
pub fn flipper_surface_velocity(flipper: &Flipper, rel: Vec2, max_speed: f32) -> Vec2 {
    let v = flipper.angular_vel * Vec2::new(-rel.y, rel.x);
    clamp_length(v, max_speed)
}

/// Bounce the ball off a flipper.
///
/// The hit test is on the ball centre only. The flipper's surface velocity is
/// removed before reflecting and added back after, so a swinging flipper
/// adds speed instead of only turning the ball.
pub fn ball_flipper_collision(
    ball: &mut Ball,
    flipper: &Flipper,
    half_height: f32,
    max_surface_speed: f32,
) -> FlipperContact {
    if !flipper_contains(flipper, ball.pos, half_height) {
        return FlipperContact::Miss;
    }

    let rel = ball.pos - flipper.pivot;
    let normal = flipper.surface_normal();
    let flipper_vel = flipper_surface_velocity(flipper, rel, max_surface_speed);

    let relative = ball.vel - flipper_vel;
    let new_vel = reflect(relative, normal) + flipper_vel;

    if !new_vel.is_finite() {
        log::warn!(
            "Discarding non-finite flipper bounce ({:?} flipper, vel {:?})",
            flipper.side,
            ball.vel
        );
        return FlipperContact::Rejected;
    }

    ball.vel = new_vel;
    FlipperContact::Hit { normal }
}

/// Bounce off the side and top walls and the floor pits behind each flipper.
///
/// `r` is the scaled ball radius. Each face is checked independently, so a
/// corner can report two walls. The floor between the flippers is left open.
pub fn ball_wall_collisions(
    ball: &mut Ball,
    r: f32,
    left_pivot_x: f32,
    right_pivot_x: f32,
    restitution: f32,
) -> Vec<Wall> {
    let mut hits = Vec::new();

    let left = WALL_LEFT + SIDE_WALL_THICKNESS;
    if ball.pos.x - r < left {
        ball.pos.x = left + r;
        ball.vel.x *= -restitution;
        hits.push(Wall::Left);
    }

    let right = WALL_RIGHT - SIDE_WALL_THICKNESS;
    if ball.pos.x + r > right {
        ball.pos.x = right - r;
        ball.vel.x *= -restitution;
        hits.push(Wall::Right);
    }

    if ball.pos.y + r > WALL_TOP {
        ball.pos.y = WALL_TOP - r;
        ball.vel.y *= -restitution;
        hits.push(Wall::Top);
    }

    let pit_floor = WALL_BOTTOM + PIT_HEIGHT;
    if ball.pos.y - r < pit_floor && ball.pos.x - r < left_pivot_x {
        ball.pos.y = pit_floor + r;
        ball.vel.y *= -restitution;
        hits.push(Wall::LeftPit);
    }

    if ball.pos.y - r < pit_floor && ball.pos.x + r > right_pivot_x {
        ball.pos.y = pit_floor + r;
        ball.vel.y *= -restitution;
        hits.push(Wall::RightPit);
    }

    hits
}

/// Elastic bounce off a round obstacle.
///
/// Obstacles collide with `radius / radius_divisor`, smaller than they are
/// drawn. The ball is not pushed out, only its velocity is reflected.
/// Coincident centres have no usable normal and are skipped.
pub fn ball_obstacle_collision(
    ball: &mut Ball,
    obstacle: &Obstacle,
    r: f32,
    radius_divisor: f32,
) -> bool {
    let offset = ball.pos - obstacle.pos;
    if offset.length() >= r + obstacle.radius / radius_divisor {
        return false;
    }
    match try_normalize(offset) {
        Some(normal) => {
            ball.vel = reflect(ball.vel, normal);
            true
        }
        None => false,
    }
}

/// Whether the ball has dropped out through the drain
#[inline]
pub fn ball_drained(ball: &Ball, r: f32) -> bool {
    ball.pos.y - r < WALL_BOTTOM
}
