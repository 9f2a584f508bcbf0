//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (obstacle layout)
//! - Fixed per-tick order: flippers, gravity, integration, collisions, drain
//! - No rendering or platform dependencies

pub mod collision;
pub mod flipper;
pub mod geom;
pub mod state;
pub mod tick;

pub use collision::{
    FlipperContact, ball_drained, ball_flipper_collision, ball_obstacle_collision,
    ball_wall_collisions, flipper_contains,
};
pub use flipper::advance;
pub use state::{
    Ball, FixedObstacles, Flipper, FlipperSide, GameEvent, GamePhase, Obstacle, ObstacleGenerator,
    RngState, SeededObstacles, Wall, WorldState,
};
pub use tick::{InputEvent, apply_input, tick};
