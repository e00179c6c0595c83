//! Per-frame simulation tick
//!
//! Sequences countdown, pause and play. Within a running tick the order is
//! fixed: player, boss, shots, traffic, collisions, progression.

use super::boss::update_boss;
use super::collision::resolve_collisions;
use super::level::level_config;
use super::progression::{boss_progress, start_boss, update_progression};
use super::spawn::{spawn_bonus, spawn_cars};
use super::state::{Countdown, GameState, PendingAction};
use super::step::{decay_effects, update_bombs, update_bonuses, update_cars, update_projectiles};
use crate::consts::*;
use crate::frame_multiplier;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering keys currently held
    pub left: bool,
    pub right: bool,
    /// Pause toggle (edge)
    pub pause: bool,
    /// Escape pressed this frame (edge); twice within a second quits
    pub escape: bool,
}

/// Turns animation-frame timestamps into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame, and any gap longer
    /// than `MAX_FRAME_GAP_MS`, count as one reference frame.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms >= last && now_ms - last <= MAX_FRAME_GAP_MS => {
                (now_ms - last) as f32
            }
            _ => REFERENCE_FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous frame (after the loop was stopped)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// HUD snapshot for the front-end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub lives: i32,
    pub level: u32,
    /// Whole seconds before the boss arrives
    pub seconds_left: u32,
    /// 0..=1 progress toward (or through) the boss encounter
    pub boss_progress: f32,
}

pub fn hud(state: &GameState) -> Hud {
    Hud {
        score: state.score,
        lives: state.lives.max(0),
        level: state.level,
        seconds_left: (state.time_left_ms / 1000.0).ceil().max(0.0) as u32,
        boss_progress: boss_progress(state),
    }
}

/// Begin a new game after the countdown
pub fn request_start(state: &mut GameState, level: u32) {
    state.level = level.clamp(1, MAX_LEVEL);
    state.countdown = Countdown::start(PendingAction::StartGame { level: state.level });
    log::info!("Starting at level {} after countdown", state.level);
}

/// Toggle pause. Pausing is only allowed in regular traffic; resuming goes
/// through a countdown.
pub fn toggle_pause(state: &mut GameState) {
    if !state.running || state.boss_mode() || state.countdown.is_active() {
        return;
    }
    if state.paused {
        state.paused = false;
        state.countdown = Countdown::start(PendingAction::Resume);
    } else {
        state.paused = true;
        log::info!("Paused");
    }
}

/// Debug: step the level by `delta`, wrapping inside 1..=MAX_LEVEL.
/// A boss on screen is replaced by one of the new level.
pub fn adjust_debug_level(state: &mut GameState, delta: i32) {
    if !state.policy.is_debug() {
        return;
    }
    let span = MAX_LEVEL as i32;
    let zero_based = (state.level as i32 - 1 + delta).rem_euclid(span);
    state.level = zero_based as u32 + 1;
    if state.boss.is_some() {
        start_boss(state);
    }
}

fn complete_countdown(state: &mut GameState, then: PendingAction) {
    state.countdown = Countdown::Idle;
    match then {
        PendingAction::StartGame { level } => {
            // Debug runs keep a level picked during the countdown
            let level = if state.policy.is_debug() {
                state.level
            } else {
                level
            };
            state.reset_run(level);
            log::info!("Game started at level {}", state.level);
        }
        PendingAction::Resume => log::info!("Resumed"),
    }
}

fn advance_countdown(state: &mut GameState, dt_ms: f32) {
    let Countdown::CountingDown {
        value,
        remaining_ms,
        then,
    } = state.countdown
    else {
        return;
    };

    let remaining_ms = remaining_ms - dt_ms;
    if remaining_ms > 0.0 {
        state.countdown = Countdown::CountingDown {
            value,
            remaining_ms,
            then,
        };
    } else if value > 1 {
        state.countdown = Countdown::CountingDown {
            value: value - 1,
            remaining_ms: COUNTDOWN_DIGIT_MS,
            then,
        };
    } else {
        complete_countdown(state, then);
    }
}

fn track_escape(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.escape_window_ms = (state.escape_window_ms - dt_ms).max(0.0);
    if !input.escape || !state.running {
        return;
    }
    if state.escape_window_ms > 0.0 {
        state.escape_presses += 1;
    } else {
        state.escape_presses = 1;
    }
    state.escape_window_ms = ESCAPE_WINDOW_MS as f32;
    if state.escape_presses >= 2 {
        log::info!("Quit requested");
        state.end_game();
    }
}

/// Advance the game by one animation frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    track_escape(state, input, dt_ms);

    if state.countdown.is_active() {
        advance_countdown(state, dt_ms);
        return;
    }

    if input.pause {
        toggle_pause(state);
    }
    if state.paused || !state.running || state.countdown.is_active() {
        return;
    }

    let fm = frame_multiplier(dt_ms);
    let cfg = level_config(state.level);

    decay_effects(state, dt_ms);
    state.car_spawn_cooldown_ms -= dt_ms;
    state.bonus_spawn_cooldown_ms -= dt_ms;

    state.player.steer(input.left, input.right, fm);

    update_boss(state, dt_ms);
    update_projectiles(state, dt_ms);
    update_bombs(state, dt_ms);

    spawn_cars(state, &cfg);
    spawn_bonus(state, &cfg);
    update_cars(state, dt_ms);
    update_bonuses(state, &cfg, dt_ms);

    resolve_collisions(state);

    if state.running {
        update_progression(state, dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameEvent, LevelPhase, SpawnPolicy, Vehicle, VehicleKind};
    use glam::Vec2;

    const FRAME: f32 = REFERENCE_FRAME_MS;

    fn started_state(level: u32) -> GameState {
        let mut state = GameState::new(12345);
        request_start(&mut state, level);
        // Three digits of half a second
        for _ in 0..200 {
            if !state.countdown.is_active() {
                break;
            }
            tick(&mut state, &TickInput::default(), FRAME);
        }
        state
    }

    #[test]
    fn test_countdown_then_start() {
        let mut state = GameState::new(1);
        request_start(&mut state, 4);
        assert!(state.is_active());
        assert!(!state.running);

        let mut ticks = 0;
        while state.countdown.is_active() {
            tick(&mut state, &TickInput::default(), 100.0);
            ticks += 1;
        }
        assert_eq!(ticks, 15);
        assert!(state.running);
        assert_eq!(state.level, 4);
        assert!(state.cars.is_empty());
    }

    #[test]
    fn test_countdown_skips_simulation() {
        let mut state = started_state(1);
        state.countdown = Countdown::start(PendingAction::Resume);
        state
            .cars
            .push(Vehicle::new(VehicleKind::Car, Vec2::new(33.0, 0.0), 3.0));
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.cars[0].pos.y, 0.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = started_state(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME);
        assert!(state.paused);

        let cars = state.cars.len();
        let player = state.player.pos;
        for _ in 0..30 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    ..Default::default()
                },
                FRAME,
            );
        }
        assert_eq!(state.cars.len(), cars);
        assert_eq!(state.player.pos, player);

        tick(&mut state, &pause, FRAME);
        assert!(!state.paused);
        assert!(state.countdown.is_active());
        assert_eq!(
            state.countdown,
            Countdown::start(PendingAction::Resume)
        );
    }

    #[test]
    fn test_no_pause_during_boss() {
        let mut state = started_state(1);
        start_boss(&mut state);
        toggle_pause(&mut state);
        assert!(!state.paused);
    }

    #[test]
    fn test_double_escape_quits() {
        let mut state = started_state(1);
        let escape = TickInput {
            escape: true,
            ..Default::default()
        };
        tick(&mut state, &escape, FRAME);
        assert!(state.running);
        tick(&mut state, &escape, FRAME);
        assert!(!state.running);
        assert!(!state.is_active());
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_slow_escapes_do_not_quit() {
        let mut state = started_state(1);
        state.policy = SpawnPolicy::PermanentBoss;
        let escape = TickInput {
            escape: true,
            ..Default::default()
        };
        tick(&mut state, &escape, FRAME);
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), FRAME);
        }
        tick(&mut state, &escape, FRAME);
        assert!(state.running);
    }

    #[test]
    fn test_car_collision_scenario() {
        let mut state = started_state(1);
        // Keep the spawner out of the way
        state.car_spawn_cooldown_ms = 60_000.0;
        state.bonus_spawn_cooldown_ms = 60_000.0;
        let mut car = Vehicle::new(VehicleKind::Car, Vec2::new(200.0, 540.0), 2.48);
        car.scored = true;
        state.cars.push(car);

        tick(&mut state, &TickInput::default(), FRAME);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(state.cars.is_empty());
        let effect = state.collision_effect.expect("collision effect");
        assert!((effect.pos.x - 200.0).abs() < 1e-3);
        assert!((effect.pos.y - (550.0 + 542.48) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_slow_frame_moto_still_collides() {
        let mut state = started_state(25);
        state.car_spawn_cooldown_ms = 60_000.0;
        state.bonus_spawn_cooldown_ms = 60_000.0;
        state
            .cars
            .push(Vehicle::new(VehicleKind::Moto, Vec2::new(200.0, 520.0), 15.0));

        tick(&mut state, &TickInput::default(), 100.0);

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert!(state.cars.is_empty());
    }

    #[test]
    fn test_boss_cycle_scenario() {
        let mut state = started_state(1);
        state.level_elapsed_ms = LEVEL_DURATION_MS - 1.0;

        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.boss.is_some());
        assert_eq!(state.phase, LevelPhase::BossActive);

        // Stay out of the boss's line of fire for the whole window
        state.lives = 1_000;
        let ticks = (BOSS_DURATION_MS / FRAME) as usize + 2;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), FRAME);
            if state.phase != LevelPhase::BossActive {
                break;
            }
        }

        assert_eq!(state.phase, LevelPhase::BossLeaving);
        assert_eq!(state.level, 2);
        assert!(state.boss.as_ref().is_some_and(|b| b.is_leaving));

        // Traffic resumes while the boss is still flying off
        state.car_spawn_cooldown_ms = 0.0;
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.boss.is_some());
        assert!(!state.cars.is_empty());

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), FRAME);
        }
        assert!(state.boss.is_none());
        assert_eq!(state.phase, LevelPhase::Normal);
    }

    #[test]
    fn test_debug_level_wraps() {
        let mut state = started_state(25);
        adjust_debug_level(&mut state, 1);
        assert_eq!(state.level, 25);

        state.policy = SpawnPolicy::PermanentBoss;
        adjust_debug_level(&mut state, 1);
        assert_eq!(state.level, 1);
        adjust_debug_level(&mut state, -1);
        assert_eq!(state.level, 25);
    }

    #[test]
    fn test_hud_snapshot() {
        let mut state = started_state(3);
        state.level_elapsed_ms = 12_500.0;
        state.time_left_ms = LEVEL_DURATION_MS - 12_500.0;
        state.score = 42;
        let hud = hud(&state);
        assert_eq!(hud.score, 42);
        assert_eq!(hud.level, 3);
        assert_eq!(hud.lives, STARTING_LIVES);
        assert_eq!(hud.seconds_left, 18);
        assert!((hud.boss_progress - 12_500.0 / LEVEL_DURATION_MS).abs() < 1e-6);
    }

    #[test]
    fn test_frame_clock_resets_after_stall() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), REFERENCE_FRAME_MS);
        assert_eq!(clock.delta(1016.0), 16.0);
        assert_eq!(clock.delta(1500.0), REFERENCE_FRAME_MS);
        assert_eq!(clock.delta(1600.0), 100.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = started_state(7);
        let mut b = started_state(7);
        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, FRAME);
            tick(&mut b, input, FRAME);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.cars.len(), b.cars.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
