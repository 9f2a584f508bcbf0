//! Flipper Pinball headless runner
//!
//! Plays a scripted session against the simulation at 60 Hz and prints the
//! final table state as JSON. Windowing and GPU upload belong to a host
//! application; this binary only drives the loop.
//!
//! Usage: `flipper-pinball [seed] [frames]`, with `PINBALL_TUNING=<file.json>`
//! to override physics constants and `RUST_LOG=debug` to see every hit.

use std::error::Error;

use flipper_pinball::{Tuning, TuningError};
use flipper_pinball::renderer::FrameMesh;
use flipper_pinball::sim::{
    FlipperSide, GameEvent, GamePhase, InputEvent, WorldState, apply_input, tick,
};

/// Host frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame the sim will accept (hitches are clamped)
const MAX_FRAME_DT: f32 = 0.1;
const DEFAULT_FRAMES: u64 = 3600;

/// Game instance holding all state
struct Game {
    state: WorldState,
    mesh: FrameMesh,
    frame: u64,
    launches: u32,
    drains: u32,
    flipper_hits: u32,
    obstacle_hits: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self {
            state: WorldState::with_tuning(seed, tuning)?,
            mesh: FrameMesh::new(),
            frame: 0,
            launches: 0,
            drains: 0,
            flipper_hits: 0,
            obstacle_hits: 0,
        })
    }

    /// Scripted player: relaunch when idle, flap each flipper on its own rhythm
    fn scripted_input(&self) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        if self.state.phase == GamePhase::NotStarted && self.frame % 30 == 0 {
            inputs.push(InputEvent::LaunchPressed);
        }
        match self.frame % 45 {
            0 => inputs.push(InputEvent::FlipperPressed(FlipperSide::Left)),
            12 => inputs.push(InputEvent::FlipperReleased(FlipperSide::Left)),
            _ => {}
        }
        match self.frame % 55 {
            20 => inputs.push(InputEvent::FlipperPressed(FlipperSide::Right)),
            32 => inputs.push(InputEvent::FlipperReleased(FlipperSide::Right)),
            _ => {}
        }
        inputs
    }

    /// One host frame: input, tick, mesh
    fn update(&mut self, dt: f32) {
        for input in self.scripted_input() {
            apply_input(&mut self.state, input);
        }

        for event in tick(&mut self.state, dt.min(MAX_FRAME_DT)) {
            match event {
                GameEvent::Launched => self.launches += 1,
                GameEvent::Drained => {
                    self.drains += 1;
                    log::info!("Drain #{} at frame {}", self.drains, self.frame);
                }
                GameEvent::FlipperHit { .. } => self.flipper_hits += 1,
                GameEvent::ObstacleHit { .. } => self.obstacle_hits += 1,
                GameEvent::WallHit { .. } => {}
            }
        }

        self.mesh.rebuild(&self.state);
        self.frame += 1;
    }
}

fn load_tuning() -> Result<Tuning, Box<dyn Error>> {
    match std::env::var("PINBALL_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            let tuning = Tuning::from_json(&json)?;
            log::info!("Loaded tuning from {path}");
            Ok(tuning)
        }
        Err(_) => Ok(Tuning::default()),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    let frames = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let tuning = load_tuning()?;
    let mut game = Game::new(seed, tuning)?;
    log::info!("Running {frames} frames with seed {seed}");

    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    log::info!(
        "Done: {} launches, {} drains, {} flipper hits, {} obstacle hits, {} vertices/frame",
        game.launches,
        game.drains,
        game.flipper_hits,
        game.obstacle_hits,
        game.mesh.vertices().len()
    );
    println!("{}", serde_json::to_string_pretty(&game.state)?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Flipper Pinball (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
