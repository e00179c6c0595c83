//! Per-tick entity steppers
//!
//! Every stepper scales its motion by the frame multiplier, so the same wall
//! time moves entities the same distance whatever the frame rate. Removal is
//! a single `retain` pass per collection.

use glam::Vec2;
use rand::Rng;

use super::level::LevelConfig;
use super::state::{
    BOMB_EXPLOSION_FRAMES, BombPhase, BonusKind, GameState, LANE_CHANGE_INTERVAL_MS, Vehicle,
};
use crate::consts::*;
use crate::{frame_multiplier, lane_center};

/// Vehicles are dropped once this far below the canvas
const CAR_EXIT_MARGIN: f32 = 70.0;
/// Bonuses are dropped once this far below the canvas
const BONUS_EXIT_MARGIN: f32 = 30.0;
/// Projectiles live inside the canvas grown by this on every side
const PROJECTILE_MARGIN: f32 = 20.0;
/// A vehicle counts as dodged once this far below the player's row
const DODGE_OFFSET: f32 = 50.0;
/// Vehicles only change lanes when at least this far from the player's row
const LANE_CHANGE_SAFE_DISTANCE: f32 = 150.0;
/// Maximum lateral easing per reference frame
const LANE_EASE_SPEED: f32 = 2.0;
/// Motos stay inside these x bounds while zigzagging
const MOTO_MIN_X: f32 = 25.0;
const MOTO_MAX_X: f32 = 375.0;
/// Bomb flight speed per reference frame
const BOMB_SPEED: f32 = 3.0;
/// Flying bombs this far past the player's row are discarded
const BOMB_OVERSHOOT: f32 = 100.0;

/// Advance all vehicles; dodged vehicles score one point each
pub fn update_cars(state: &mut GameState, dt_ms: f32) {
    let fm = frame_multiplier(dt_ms);
    let player_y = state.player.pos.y;
    let rng = &mut state.rng;
    let mut dodged = 0;

    state.cars.retain_mut(|car| {
        let step = car.speed * fm;
        car.pos.y += step;
        car.traveled += step;
        car.last_step = step;
        car.since_lane_change_ms += dt_ms;

        if let Some(zigzag) = car.zigzag {
            let t = car.traveled / car.speed.max(f32::EPSILON);
            let offset = (t * zigzag.frequency + zigzag.phase).sin() * zigzag.amplitude;
            car.pos.x = (car.initial_x + offset).clamp(MOTO_MIN_X, MOTO_MAX_X);
            car.target_x = car.pos.x;
        } else {
            if car.can_change_lane {
                maybe_change_lane(car, player_y, rng);
            }
            let diff = car.target_x - car.pos.x;
            if diff != 0.0 {
                car.pos.x += diff.signum() * diff.abs().min(LANE_EASE_SPEED * fm);
            }
        }

        if !car.scored && car.pos.y > player_y + DODGE_OFFSET {
            car.scored = true;
            dodged += 1;
        }

        car.pos.y < CANVAS_HEIGHT + CAR_EXIT_MARGIN
    });

    state.score += dodged;
}

/// Retarget to a lane at most two slots away, when far enough from the player
fn maybe_change_lane(car: &mut Vehicle, player_y: f32, rng: &mut impl Rng) {
    if car.since_lane_change_ms <= LANE_CHANGE_INTERVAL_MS
        || (car.pos.y - player_y).abs() <= LANE_CHANGE_SAFE_DISTANCE
    {
        return;
    }
    let Some(lane) = car.lane else {
        return;
    };
    if !rng.random_bool(0.3) {
        return;
    }

    let candidates: Vec<usize> = [-2i32, -1, 1, 2]
        .iter()
        .map(|offset| lane as i32 + offset)
        .filter(|&l| l >= 0 && (l as usize) < LANES.len())
        .map(|l| l as usize)
        .collect();
    if candidates.is_empty() {
        return;
    }

    let next = candidates[rng.random_range(0..candidates.len())];
    car.lane = Some(next);
    car.target_x = lane_center(next);
    car.since_lane_change_ms = 0.0;
}

/// Fall speed of bonuses; tied to traffic speed but slower
pub fn bonus_speed(cfg: &LevelConfig, kind: BonusKind) -> f32 {
    let base = 3.0 + (cfg.car_speed - 2.0) * 0.5;
    match kind {
        BonusKind::Star => base,
        BonusKind::Heart => base * 1.2,
    }
}

/// Advance bonuses and drop those below the canvas
pub fn update_bonuses(state: &mut GameState, cfg: &LevelConfig, dt_ms: f32) {
    let fm = frame_multiplier(dt_ms);
    state.bonuses.retain_mut(|bonus| {
        bonus.pos.y += bonus_speed(cfg, bonus.kind) * fm;
        bonus.pos.y < CANVAS_HEIGHT + BONUS_EXIT_MARGIN
    });
}

/// Move projectiles along their velocity; drop those out of bounds
pub fn update_projectiles(state: &mut GameState, dt_ms: f32) {
    let fm = frame_multiplier(dt_ms);
    state.projectiles.retain_mut(|proj| {
        proj.pos += proj.vel * fm;
        proj.pos.x > -PROJECTILE_MARGIN
            && proj.pos.x < CANVAS_WIDTH + PROJECTILE_MARGIN
            && proj.pos.y > -PROJECTILE_MARGIN
            && proj.pos.y < CANVAS_HEIGHT + PROJECTILE_MARGIN
    });
}

/// Fly bombs to their target, then run out the explosion
pub fn update_bombs(state: &mut GameState, dt_ms: f32) {
    let fm = frame_multiplier(dt_ms);
    let player_y = state.player.pos.y;

    state.bombs.retain_mut(|bomb| match bomb.phase {
        BombPhase::Flying => {
            let step = BOMB_SPEED * fm;
            let to_target: Vec2 = bomb.target - bomb.pos;
            let distance = to_target.length();
            if distance > step {
                bomb.pos += to_target / distance * step;
                // Runaway bombs past the player never explode
                bomb.pos.y <= player_y + BOMB_OVERSHOOT
            } else {
                bomb.pos = bomb.target;
                bomb.phase = BombPhase::Exploding;
                bomb.timer = BOMB_EXPLOSION_FRAMES;
                true
            }
        }
        BombPhase::Exploding => {
            bomb.timer -= fm;
            bomb.timer > 0.0
        }
    });
}

/// Run down the crash flicker and the explosion sprite
pub fn decay_effects(state: &mut GameState, dt_ms: f32) {
    let fm = frame_multiplier(dt_ms);
    state.player.crash_timer = (state.player.crash_timer - fm).max(0.0);
    if let Some(effect) = state.collision_effect.as_mut() {
        effect.timer -= fm;
        if effect.timer <= 0.0 {
            state.collision_effect = None;
        }
    }
}
