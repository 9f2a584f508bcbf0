//! World state and core simulation types
//!
//! Everything the host renders or snapshots lives in `WorldState`.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{Tuning, TuningError};
use crate::{rotate, vec2};

/// Control state of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball idle at the spawn point, waiting for launch
    NotStarted,
    /// Ball in play, full physics active
    Launched,
}

/// Which flipper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

/// Wall faces the ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    /// Floor section outside the left flipper
    LeftPit,
    /// Floor section outside the right flipper
    RightPit,
}

/// Things that happened during a tick, for sound/UI on the host side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    FlipperHit { side: FlipperSide },
    WallHit { wall: Wall },
    ObstacleHit { index: usize },
    Drained,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Model-space radius; collision uses `radius * game_scale`
    pub radius: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: vec2(tuning.ball_spawn),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
        }
    }

    /// Collision radius in world units
    #[inline]
    pub fn scaled_radius(&self, game_scale: f32) -> f32 {
        self.radius * game_scale
    }

    /// Put the ball back at the spawn point, at rest
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = vec2(tuning.ball_spawn);
        self.vel = Vec2::ZERO;
    }
}

/// A flipper rotating around a fixed pivot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot: Vec2,
    /// Current angle (radians). The right flipper stores it mirrored, see `signed_angle`.
    pub current_angle: f32,
    /// Angle the flipper is moving toward (set by input)
    pub target_angle: f32,
    /// Derived each tick from the angle change
    pub angular_vel: f32,
    pub length: f32,
}

impl Flipper {
    pub fn new(side: FlipperSide, tuning: &Tuning) -> Self {
        let pivot = match side {
            FlipperSide::Left => vec2(LEFT_FLIPPER_PIVOT),
            FlipperSide::Right => vec2(RIGHT_FLIPPER_PIVOT),
        };
        Self {
            side,
            pivot,
            current_angle: tuning.flipper_initial_angle,
            target_angle: tuning.flipper_initial_angle,
            angular_vel: 0.0,
            length: tuning.flipper_length,
        }
    }

    /// World-space rotation of the flipper body.
    ///
    /// Both flippers raise with a positive stored angle, so the right one
    /// rotates the other way on screen.
    #[inline]
    pub fn signed_angle(&self) -> f32 {
        match self.side {
            FlipperSide::Left => self.current_angle,
            FlipperSide::Right => -self.current_angle,
        }
    }

    /// Local x extent of the flipper body: it points inward from the pivot
    #[inline]
    pub fn local_x_range(&self) -> (f32, f32) {
        match self.side {
            FlipperSide::Left => (0.0, self.length),
            FlipperSide::Right => (-self.length, 0.0),
        }
    }

    /// Transform a world point into this flipper's local frame
    #[inline]
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        rotate(point - self.pivot, -self.signed_angle())
    }

    /// Transform a local point back to world space
    #[inline]
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        rotate(local, self.signed_angle()) + self.pivot
    }

    /// Contact normal of the flipper's top face
    #[inline]
    pub fn surface_normal(&self) -> Vec2 {
        rotate(Vec2::Y, self.signed_angle())
    }

    pub fn press(&mut self, tuning: &Tuning) {
        self.target_angle = tuning.flipper_raised_angle;
    }

    pub fn release(&mut self, tuning: &Tuning) {
        self.target_angle = tuning.flipper_rest_angle;
    }
}

/// A round bumper obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
}

/// Source of obstacle layouts
pub trait ObstacleGenerator {
    fn generate(&mut self, tuning: &Tuning) -> Vec<Obstacle>;
}

/// Obstacles sampled uniformly from the upper playfield with a seeded PCG
#[derive(Debug, Clone)]
pub struct SeededObstacles {
    rng: Pcg32,
}

impl SeededObstacles {
    pub fn from_rng(rng: Pcg32) -> Self {
        Self { rng }
    }
}

impl ObstacleGenerator for SeededObstacles {
    fn generate(&mut self, tuning: &Tuning) -> Vec<Obstacle> {
        (0..tuning.obstacle_count)
            .map(|_| {
                let x = self.rng.random_range((WALL_LEFT + 0.2)..=(WALL_RIGHT - 0.2));
                let y = self.rng.random_range(-0.2..=(WALL_TOP - 0.2));
                let radius = self
                    .rng
                    .random_range(tuning.obstacle_min_radius..=tuning.obstacle_max_radius);
                Obstacle {
                    pos: Vec2::new(x, y),
                    radius,
                }
            })
            .collect()
    }
}

/// Fixed obstacle layout, handy for tests and hand-made tables
#[derive(Debug, Clone, Default)]
pub struct FixedObstacles(pub Vec<Obstacle>);

impl ObstacleGenerator for FixedObstacles {
    fn generate(&mut self, _tuning: &Tuning) -> Vec<Obstacle> {
        self.0.clone()
    }
}

/// RNG state wrapper for serialization
///
/// Each layout generation uses its own PCG stream so a restart after a
/// snapshot reproduces the same next layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete table state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub obstacles: Vec<Obstacle>,
    /// Simulation tick counter (ticks that advanced physics)
    pub time_ticks: u64,
    /// Events raised since the last tick (drained by `tick`)
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl WorldState {
    /// Create a table with default tuning and a seeded obstacle field
    pub fn new(seed: u64) -> Self {
        Self::seeded(seed, Tuning::default())
    }

    /// Create a seeded table with custom tuning, rejecting values the
    /// simulation cannot run with
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::seeded(seed, tuning))
    }

    /// Create a table whose obstacles come from `generator`
    pub fn with_generator<G: ObstacleGenerator + ?Sized>(
        tuning: Tuning,
        generator: &mut G,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, generator))
    }

    fn seeded(seed: u64, tuning: Tuning) -> Self {
        let mut rng_state = RngState::new(seed);
        let mut generator = SeededObstacles::from_rng(rng_state.to_rng());
        rng_state.stream += 1;
        let mut state = Self::build(tuning, &mut generator);
        state.seed = seed;
        state.rng_state = rng_state;
        state
    }

    fn build<G: ObstacleGenerator + ?Sized>(tuning: Tuning, generator: &mut G) -> Self {
        let obstacles = generator.generate(&tuning);
        log::info!("Table ready with {} obstacles", obstacles.len());
        Self {
            seed: 0,
            rng_state: RngState::new(0),
            phase: GamePhase::NotStarted,
            ball: Ball::new(&tuning),
            left_flipper: Flipper::new(FlipperSide::Left, &tuning),
            right_flipper: Flipper::new(FlipperSide::Right, &tuning),
            obstacles,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start over: new obstacle layout from the next RNG stream, ball and flippers reset
    pub fn restart(&mut self) {
        let mut generator = SeededObstacles::from_rng(self.rng_state.to_rng());
        self.rng_state.stream += 1;
        self.restart_with(&mut generator);
    }

    /// Start over with obstacles from a caller-supplied generator
    pub fn restart_with<G: ObstacleGenerator + ?Sized>(&mut self, generator: &mut G) {
        self.obstacles = generator.generate(&self.tuning);
        self.ball.respawn(&self.tuning);
        self.left_flipper = Flipper::new(FlipperSide::Left, &self.tuning);
        self.right_flipper = Flipper::new(FlipperSide::Right, &self.tuning);
        self.phase = GamePhase::NotStarted;
        self.time_ticks = 0;
        self.events.clear();
        log::info!(
            "Table restarted (stream {}) with {} obstacles",
            self.rng_state.stream,
            self.obstacles.len()
        );
    }

    /// Launch the ball if it is waiting at the spawn point.
    ///
    /// Returns true if the ball was launched.
    pub fn on_launch_pressed(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.ball.vel = vec2(self.tuning.launch_velocity);
        self.phase = GamePhase::Launched;
        self.events.push(GameEvent::Launched);
        log::info!("Ball launched with velocity {:?}", self.ball.vel);
        true
    }

    pub fn on_flipper_pressed(&mut self, side: FlipperSide) {
        let tuning = &self.tuning;
        match side {
            FlipperSide::Left => self.left_flipper.press(tuning),
            FlipperSide::Right => self.right_flipper.press(tuning),
        }
    }

    pub fn on_flipper_released(&mut self, side: FlipperSide) {
        let tuning = &self.tuning;
        match side {
            FlipperSide::Left => self.left_flipper.release(tuning),
            FlipperSide::Right => self.right_flipper.release(tuning),
        }
    }

    /// Events raised by input since the last tick
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}
