//! Data-driven table tuning
//!
//! Every physics constant the simulation reads comes from a `Tuning` value.
//! Defaults match `crate::consts`; a JSON file may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Failure to load a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Parsing failed : {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{field}` : {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Physics constants for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Fraction of normal velocity kept after a wall bounce
    pub wall_restitution: f32,
    /// Model-to-world scale applied to the ball radius
    pub game_scale: f32,
    pub ball_radius: f32,
    pub ball_spawn: [f32; 2],
    pub launch_velocity: [f32; 2],

    // === Flippers ===
    pub flipper_length: f32,
    pub flipper_half_height: f32,
    pub flipper_initial_angle: f32,
    pub flipper_raised_angle: f32,
    pub flipper_rest_angle: f32,
    /// Max angle change per second while moving toward the target
    pub flipper_max_angular_speed: f32,
    /// Clamp on the derived angular velocity
    pub flipper_max_angular_vel: f32,
    pub flipper_max_surface_speed: f32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_min_radius: f32,
    pub obstacle_max_radius: f32,
    pub obstacle_radius_divisor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            wall_restitution: WALL_RESTITUTION,
            game_scale: GAME_SCALE,
            ball_radius: BALL_RADIUS,
            ball_spawn: BALL_SPAWN,
            launch_velocity: LAUNCH_VELOCITY,

            flipper_length: FLIPPER_LENGTH,
            flipper_half_height: FLIPPER_HALF_HEIGHT,
            flipper_initial_angle: FLIPPER_INITIAL_ANGLE,
            flipper_raised_angle: FLIPPER_RAISED_ANGLE,
            flipper_rest_angle: FLIPPER_REST_ANGLE,
            flipper_max_angular_speed: FLIPPER_MAX_ANGULAR_SPEED,
            flipper_max_angular_vel: FLIPPER_MAX_ANGULAR_VEL,
            flipper_max_surface_speed: FLIPPER_MAX_SURFACE_SPEED,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_min_radius: OBSTACLE_MIN_RADIUS,
            obstacle_max_radius: OBSTACLE_MAX_RADIUS,
            obstacle_radius_divisor: OBSTACLE_RADIUS_DIVISOR,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let scalars = [
            ("gravity", self.gravity),
            ("wall_restitution", self.wall_restitution),
            ("game_scale", self.game_scale),
            ("ball_radius", self.ball_radius),
            ("flipper_length", self.flipper_length),
            ("flipper_half_height", self.flipper_half_height),
            ("flipper_initial_angle", self.flipper_initial_angle),
            ("flipper_raised_angle", self.flipper_raised_angle),
            ("flipper_rest_angle", self.flipper_rest_angle),
            ("flipper_max_angular_speed", self.flipper_max_angular_speed),
            ("flipper_max_angular_vel", self.flipper_max_angular_vel),
            ("flipper_max_surface_speed", self.flipper_max_surface_speed),
            ("obstacle_min_radius", self.obstacle_min_radius),
            ("obstacle_max_radius", self.obstacle_max_radius),
            ("obstacle_radius_divisor", self.obstacle_radius_divisor),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }
        for (field, xy) in [
            ("ball_spawn", self.ball_spawn),
            ("launch_velocity", self.launch_velocity),
        ] {
            if !xy.iter().all(|c| c.is_finite()) {
                return Err(invalid(field, format!("{xy:?} is not finite")));
            }
        }

        let positive = [
            ("game_scale", self.game_scale),
            ("ball_radius", self.ball_radius),
            ("flipper_length", self.flipper_length),
            ("flipper_half_height", self.flipper_half_height),
            ("flipper_max_angular_speed", self.flipper_max_angular_speed),
            ("flipper_max_angular_vel", self.flipper_max_angular_vel),
            ("flipper_max_surface_speed", self.flipper_max_surface_speed),
            ("obstacle_min_radius", self.obstacle_min_radius),
            ("obstacle_radius_divisor", self.obstacle_radius_divisor),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(invalid(field, format!("{value} must be > 0")));
            }
        }

        if self.gravity < 0.0 {
            return Err(invalid("gravity", format!("{} must be >= 0", self.gravity)));
        }
        if self.wall_restitution <= 0.0 || self.wall_restitution > 1.0 {
            return Err(invalid(
                "wall_restitution",
                format!("{} must be in (0, 1]", self.wall_restitution),
            ));
        }
        if self.obstacle_max_radius < self.obstacle_min_radius {
            return Err(invalid(
                "obstacle_max_radius",
                format!(
                    "{} is below obstacle_min_radius {}",
                    self.obstacle_max_radius, self.obstacle_min_radius
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}
