//! Level timer and boss encounter state machine
//!
//! `Normal` -> `BossActive` when the level timer runs out, `BossActive` ->
//! `BossLeaving` after the boss window; the boss stepper finishes the exit and
//! drops back to `Normal`.

use rand::Rng;

use super::state::{Boss, GameEvent, GameState, LevelPhase, Notice, SpawnPolicy};
use crate::consts::*;

/// Number of boss sprites to pick from
pub const BOSS_VARIANTS: u8 = 3;

/// Advance the level timer and drive boss entry/exit
pub fn update_progression(state: &mut GameState, dt_ms: f32) {
    if state.policy == SpawnPolicy::PermanentBoss {
        if state.boss.is_none() {
            start_boss(state);
        }
        return;
    }

    match state.phase {
        LevelPhase::Normal | LevelPhase::BossLeaving => {
            state.level_elapsed_ms += dt_ms;
            state.time_left_ms = (LEVEL_DURATION_MS - state.level_elapsed_ms).max(0.0);

            if state.phase == LevelPhase::BossLeaving && state.boss.is_none() {
                state.phase = LevelPhase::Normal;
            }
            if state.phase == LevelPhase::Normal && state.level_elapsed_ms >= LEVEL_DURATION_MS {
                start_boss(state);
            }
        }
        LevelPhase::BossActive => {
            let window_over = match state.boss.as_mut() {
                Some(boss) => {
                    boss.elapsed_ms += dt_ms;
                    boss.elapsed_ms >= BOSS_DURATION_MS
                }
                None => true,
            };
            if window_over {
                begin_boss_exit(state);
            }
        }
    }
}

/// Bring in a fresh boss; bonuses and shots on screen are cleared, traffic stays
pub fn start_boss(state: &mut GameState) {
    let variant = state.rng.random_range(0..BOSS_VARIANTS);
    state.bonuses.clear();
    state.projectiles.clear();
    state.bombs.clear();
    state.boss = Some(Boss::new(state.level, variant));
    state.phase = LevelPhase::BossActive;
    state.time_left_ms = 0.0;

    log::info!("Boss entered at level {}", state.level);
    state.push_event(GameEvent::BossEntered { level: state.level });
}

/// Send the boss off, resume traffic and move to the next level
fn begin_boss_exit(state: &mut GameState) {
    if let Some(boss) = state.boss.as_mut() {
        boss.is_leaving = true;
        state.phase = LevelPhase::BossLeaving;
    } else {
        state.phase = LevelPhase::Normal;
    }

    state.level_elapsed_ms = 0.0;
    state.time_left_ms = LEVEL_DURATION_MS;
    state.level = (state.level + 1).min(MAX_LEVEL);

    if state.level % 5 == 0 {
        state.lives += LIVES_PER_5_LEVELS;
        state.push_event(GameEvent::Notify(Notice::BonusLives(LIVES_PER_5_LEVELS)));
    }

    log::info!("Level up: {}", state.level);
    state.push_event(GameEvent::LevelUp { level: state.level });
}

/// Boss progress for the HUD: level timer before the boss, boss window during it
pub fn boss_progress(state: &GameState) -> f32 {
    match (state.phase, state.boss.as_ref()) {
        (LevelPhase::BossActive, Some(boss)) => (boss.elapsed_ms / BOSS_DURATION_MS).min(1.0),
        _ => (state.level_elapsed_ms / LEVEL_DURATION_MS).min(1.0),
    }
}
