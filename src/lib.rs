//! Flipper Pinball - a two-flipper pinball table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flippers, ball physics, collisions, game phase)
//! - `renderer`: CPU-side mesh building for a host renderer
//! - `tuning`: Data-driven physics constants

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Table configuration constants
pub mod consts {
    /// Playfield bounds
    pub const WALL_LEFT: f32 = -1.0;
    pub const WALL_RIGHT: f32 = 1.0;
    pub const WALL_BOTTOM: f32 = -1.0;
    pub const WALL_TOP: f32 = 1.0;

    /// Thickness of the side walls (collision boundary sits on their inner face)
    pub const SIDE_WALL_THICKNESS: f32 = 0.1;
    /// Height of the pits behind each flipper above `WALL_BOTTOM`
    pub const PIT_HEIGHT: f32 = 0.2;
    /// Launch lane opening in the right wall, measured down from `WALL_TOP`
    pub const LANE_OPENING_TOP: f32 = 0.1;
    pub const LANE_OPENING_BOTTOM: f32 = 0.3;

    /// Drawn shapes are authored in model units and scaled by this factor
    pub const GAME_SCALE: f32 = 0.15;

    /// Ball defaults (radius in model units, see `GAME_SCALE`)
    pub const BALL_RADIUS: f32 = 0.20;
    pub const BALL_SPAWN: [f32; 2] = [1.1, 0.8];
    pub const LAUNCH_VELOCITY: [f32; 2] = [2.0, 0.5];

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 0.8;
    /// Fraction of the normal velocity kept after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Flipper defaults
    pub const LEFT_FLIPPER_PIVOT: [f32; 2] = [-0.5, -0.8];
    pub const RIGHT_FLIPPER_PIVOT: [f32; 2] = [0.5, -0.8];
    pub const FLIPPER_LENGTH: f32 = 0.4;
    pub const FLIPPER_HALF_HEIGHT: f32 = 0.025;
    pub const FLIPPER_INITIAL_ANGLE: f32 = -0.3;
    pub const FLIPPER_RAISED_ANGLE: f32 = 0.8;
    pub const FLIPPER_REST_ANGLE: f32 = -0.5;
    /// radians per second
    pub const FLIPPER_MAX_ANGULAR_SPEED: f32 = 5.0;
    pub const FLIPPER_MAX_ANGULAR_VEL: f32 = 5.0;
    /// Cap on the surface speed a flipper imparts on contact
    pub const FLIPPER_MAX_SURFACE_SPEED: f32 = 2.0;

    /// Obstacle field defaults
    pub const OBSTACLE_COUNT: usize = 6;
    pub const OBSTACLE_MIN_RADIUS: f32 = 0.1;
    pub const OBSTACLE_MAX_RADIUS: f32 = 0.3;
    /// Obstacles collide with a shrunken radius: `radius / OBSTACLE_RADIUS_DIVISOR`
    pub const OBSTACLE_RADIUS_DIVISOR: f32 = 2.5;
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Build a `Vec2` from an `[x, y]` constant
#[inline]
pub fn vec2(xy: [f32; 2]) -> Vec2 {
    Vec2::from_array(xy)
}
