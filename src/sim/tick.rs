//! Per-frame simulation tick
//!
//! Core game loop that advances the table by one variable timestep.

use super::collision::{
    FlipperContact, ball_drained, ball_flipper_collision, ball_obstacle_collision,
    ball_wall_collisions,
};
use super::flipper::advance;
use super::geom::sanitize;
use super::state::{FlipperSide, GameEvent, GamePhase, WorldState};

/// Input commands from the host (key down/up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Launch the ball (space)
    LaunchPressed,
    FlipperPressed(FlipperSide),
    FlipperReleased(FlipperSide),
}

/// Apply one input event. Repeated identical events are harmless.
pub fn apply_input(state: &mut WorldState, event: InputEvent) {
    match event {
        InputEvent::LaunchPressed => {
            state.on_launch_pressed();
        }
        InputEvent::FlipperPressed(side) => state.on_flipper_pressed(side),
        InputEvent::FlipperReleased(side) => state.on_flipper_released(side),
    }
}

/// Advance the table by `dt` seconds and return what happened.
///
/// Nothing moves until the ball is launched. Order within a tick: flippers,
/// gravity, integration, then collisions against the moved position
/// (flippers, walls, obstacles), and finally the drain check.
pub fn tick(state: &mut WorldState, dt: f32) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut state.events);

    if state.phase != GamePhase::Launched || dt <= f32::EPSILON {
        return events;
    }

    state.time_ticks += 1;

    let WorldState {
        tuning,
        phase,
        ball,
        left_flipper,
        right_flipper,
        obstacles,
        ..
    } = state;

    // Flippers
    for flipper in [&mut *left_flipper, &mut *right_flipper] {
        advance(
            flipper,
            dt,
            tuning.flipper_max_angular_speed,
            tuning.flipper_max_angular_vel,
        );
    }

    // Gravity and integration
    ball.vel.y -= tuning.gravity * dt;
    if sanitize(&mut ball.vel) {
        log::warn!("Ball velocity went non-finite, zeroed");
    }
    ball.pos += ball.vel * dt;

    let r = ball.scaled_radius(tuning.game_scale);

    for flipper in [&*left_flipper, &*right_flipper] {
        let contact = ball_flipper_collision(
            ball,
            flipper,
            tuning.flipper_half_height,
            tuning.flipper_max_surface_speed,
        );
        if let FlipperContact::Hit { normal } = contact {
            log::debug!(
                "{:?} flipper hit (angular vel {:.2}, normal {:?}) -> vel {:?}",
                flipper.side,
                flipper.angular_vel,
                normal,
                ball.vel
            );
            events.push(GameEvent::FlipperHit { side: flipper.side });
        }
    }

    for wall in ball_wall_collisions(
        ball,
        r,
        left_flipper.pivot.x,
        right_flipper.pivot.x,
        tuning.wall_restitution,
    ) {
        log::debug!("Wall hit: {wall:?}");
        events.push(GameEvent::WallHit { wall });
    }

    for (index, obstacle) in obstacles.iter().enumerate() {
        if ball_obstacle_collision(ball, obstacle, r, tuning.obstacle_radius_divisor) {
            log::debug!("Obstacle {index} hit at {:?}", obstacle.pos);
            events.push(GameEvent::ObstacleHit { index });
        }
    }

    if sanitize(&mut ball.vel) {
        log::warn!("Ball velocity went non-finite during collisions, zeroed");
    }

    if ball_drained(ball, r) {
        ball.respawn(tuning);
        *phase = GamePhase::NotStarted;
        events.push(GameEvent::Drained);
        log::info!("Ball drained, back to spawn");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{FixedObstacles, Obstacle, Wall};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn empty_table() -> WorldState {
        WorldState::with_generator(Tuning::default(), &mut FixedObstacles::default()).unwrap()
    }

    fn launched_at(pos: Vec2, vel: Vec2) -> WorldState {
        let mut state = empty_table();
        state.phase = GamePhase::Launched;
        state.ball.pos = pos;
        state.ball.vel = vel;
        state
    }

    #[test]
    fn test_launch_then_tick() {
        let mut state = WorldState::new(12345);
        assert_eq!(state.phase, GamePhase::NotStarted);

        // Tick without launch: nothing moves
        let events = tick(&mut state, 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(1.1, 0.8));
        assert_eq!(state.time_ticks, 0);

        apply_input(&mut state, InputEvent::LaunchPressed);
        assert_eq!(state.phase, GamePhase::Launched);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 0.5));

        let events = tick(&mut state, 1.0 / 60.0);
        assert_eq!(events.first(), Some(&GameEvent::Launched));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_launch_enters_through_right_wall() {
        // Spawn sits in the launch lane, right of the playfield wall
        let mut state = empty_table();
        state.on_launch_pressed();
        let events = tick(&mut state, 1.0 / 60.0);
        assert!(events.contains(&GameEvent::WallHit { wall: Wall::Right }));
        assert!((state.ball.pos.x - (0.9 - 0.03)).abs() < 1e-5);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_free_fall_from_rest() {
        let mut state = launched_at(Vec2::new(0.0, 0.5), Vec2::ZERO);
        let events = tick(&mut state, 0.1);
        assert!(events.is_empty());
        assert!((state.ball.vel.y + 0.08).abs() < 1e-6);
        assert_eq!(state.ball.vel.x, 0.0);
        assert!((state.ball.pos.y - (0.5 - 0.008)).abs() < 1e-6);
    }

    #[test]
    fn test_above_top_wall_is_pushed_back() {
        let mut state = launched_at(Vec2::new(0.0, 1.5), Vec2::ZERO);
        let events = tick(&mut state, 0.1);
        assert!(events.contains(&GameEvent::WallHit { wall: Wall::Top }));
        assert!((state.ball.pos.y - (WALL_TOP - 0.03)).abs() < 1e-6);
        assert!((state.ball.vel.y - 0.064).abs() < 1e-6);
    }

    #[test]
    fn test_collisions_use_ball_radius() {
        // Scaled radius 0.3 reaches past the top wall from y = 0.8
        let mut state = launched_at(Vec2::new(0.0, 0.8), Vec2::ZERO);
        state.ball.radius = 2.0;
        let events = tick(&mut state, 0.01);
        assert!(events.contains(&GameEvent::WallHit { wall: Wall::Top }));
        assert!((state.ball.pos.y - (WALL_TOP - 0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_drain_respawns() {
        let mut state = launched_at(Vec2::new(0.0, -0.98), Vec2::new(0.1, 0.0));
        let events = tick(&mut state, 1.0 / 60.0);
        assert_eq!(events.last(), Some(&GameEvent::Drained));
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.ball.pos, Vec2::new(1.1, 0.8));
        assert_eq!(state.ball.vel, Vec2::ZERO);

        // Can launch again
        assert!(state.on_launch_pressed());
    }

    #[test]
    fn test_flipper_bounce_in_tick() {
        let mut state = empty_table();
        state.left_flipper.current_angle = 0.0;
        state.left_flipper.target_angle = 0.0;
        let pos = state.left_flipper.pivot + Vec2::new(FLIPPER_LENGTH / 2.0, 0.0);
        state.phase = GamePhase::Launched;
        state.ball.pos = pos;
        state.ball.vel = Vec2::new(0.0, -1.0);

        let events = tick(&mut state, 0.01);
        assert!(events.contains(&GameEvent::FlipperHit {
            side: FlipperSide::Left
        }));
        assert!(state.ball.vel.y > 0.0);
        assert!((state.ball.vel.y - 1.008).abs() < 1e-5);
    }

    #[test]
    fn test_obstacle_hit_event() {
        let layout = vec![Obstacle {
            pos: Vec2::new(0.0, 0.3),
            radius: 0.25,
        }];
        let mut state =
            WorldState::with_generator(Tuning::default(), &mut FixedObstacles(layout)).unwrap();
        state.phase = GamePhase::Launched;
        state.ball.pos = Vec2::new(0.0, 0.43);
        state.ball.vel = Vec2::new(0.0, -1.0);

        let events = tick(&mut state, 0.01);
        assert_eq!(events, vec![GameEvent::ObstacleHit { index: 0 }]);
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_flippers_idle_before_launch() {
        let mut state = empty_table();
        apply_input(&mut state, InputEvent::FlipperPressed(FlipperSide::Left));
        tick(&mut state, 0.1);
        assert_eq!(state.left_flipper.current_angle, FLIPPER_INITIAL_ANGLE);
        assert_eq!(state.left_flipper.target_angle, FLIPPER_RAISED_ANGLE);
    }

    #[test]
    fn test_flippers_move_when_launched() {
        let mut state = launched_at(Vec2::new(0.0, 0.5), Vec2::ZERO);
        apply_input(&mut state, InputEvent::FlipperPressed(FlipperSide::Right));
        tick(&mut state, 0.1);
        assert!((state.right_flipper.current_angle - 0.2).abs() < 1e-5);
        assert!((state.right_flipper.angular_vel - 5.0).abs() < 1e-3);
        assert_eq!(state.left_flipper.current_angle, FLIPPER_INITIAL_ANGLE);

        apply_input(&mut state, InputEvent::FlipperReleased(FlipperSide::Right));
        assert_eq!(state.right_flipper.target_angle, FLIPPER_REST_ANGLE);
    }

    #[test]
    fn test_tiny_dt_is_noop() {
        let mut state = launched_at(Vec2::new(0.0, 0.5), Vec2::new(0.5, 0.5));
        tick(&mut state, 0.0);
        assert_eq!(state.ball.pos, Vec2::new(0.0, 0.5));
        assert_eq!(state.ball.vel, Vec2::new(0.5, 0.5));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_non_finite_velocity_zeroed() {
        let mut state = launched_at(Vec2::new(0.0, 0.5), Vec2::new(f32::NAN, 1.0));
        tick(&mut state, 0.01);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_determinism() {
        let mut a = WorldState::new(99999);
        let mut b = WorldState::new(99999);
        let script = [
            Some(InputEvent::LaunchPressed),
            None,
            Some(InputEvent::FlipperPressed(FlipperSide::Left)),
            None,
            Some(InputEvent::FlipperReleased(FlipperSide::Left)),
            Some(InputEvent::FlipperPressed(FlipperSide::Right)),
        ];
        for _ in 0..50 {
            for input in script {
                if let Some(input) = input {
                    apply_input(&mut a, input);
                    apply_input(&mut b, input);
                }
                let ea = tick(&mut a, 1.0 / 60.0);
                let eb = tick(&mut b, 1.0 / 60.0);
                assert_eq!(ea, eb);
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.ball.vel, b.ball.vel);
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    proptest! {
        #[test]
        fn velocity_always_finite(
            seed in 0u64..500,
            presses in proptest::collection::vec((any::<bool>(), any::<bool>()), 20..200),
            dt in 0.001f32..0.05,
        ) {
            let mut state = WorldState::new(seed);
            state.on_launch_pressed();
            for (left, right) in presses {
                if state.phase == GamePhase::NotStarted {
                    state.on_launch_pressed();
                }
                let event = |pressed: bool, side| {
                    if pressed {
                        InputEvent::FlipperPressed(side)
                    } else {
                        InputEvent::FlipperReleased(side)
                    }
                };
                apply_input(&mut state, event(left, FlipperSide::Left));
                apply_input(&mut state, event(right, FlipperSide::Right));
                tick(&mut state, dt);
                prop_assert!(state.ball.vel.is_finite(), "vel {:?}", state.ball.vel);
                prop_assert!(state.left_flipper.angular_vel.abs() <= FLIPPER_MAX_ANGULAR_VEL);
                prop_assert!(state.right_flipper.angular_vel.abs() <= FLIPPER_MAX_ANGULAR_VEL);
            }
        }
    }
}
