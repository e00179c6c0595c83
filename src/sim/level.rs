//! Per-level difficulty tuning

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;

/// Difficulty knobs derived from the level number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Base vehicle speed (units per reference frame)
    pub car_speed: f32,
    /// Minimum time between car bursts (ms)
    pub car_spawn_rate: f32,
    /// Minimum time between bonuses (ms)
    pub bonus_spawn_rate: f32,
    /// Cap on vehicles on screen
    pub max_cars: usize,
}

/// Difficulty for a level. Pure: same level, same config.
pub fn level_config(level: u32) -> LevelConfig {
    let l = level as f32;
    let intensity = (l / MAX_LEVEL as f32).min(1.0);

    LevelConfig {
        car_speed: 2.0 + l * 0.4 + intensity * 2.0,
        car_spawn_rate: (2000.0 - l * 120.0 - intensity * 500.0).max(800.0),
        // The floor never binds past level 17; kept as tuned.
        bonus_spawn_rate: (3000.0 + l * 400.0).max(10_000.0),
        max_cars: (2 + (level / 2) as usize).min(8),
    }
}

/// Volley cooldown for the boss (ms); allies fire at half this rate
pub fn boss_shot_cooldown(level: u32) -> f32 {
    (2500.0 - level as f32 * 50.0).max(800.0)
}

/// Bomb cooldown for the boss (ms)
pub fn boss_bomb_cooldown(level: u32) -> f32 {
    (2000.0 - level as f32 * 20.0).max(800.0)
}

/// Shots per boss volley
pub fn boss_volley_size(level: u32) -> usize {
    (1 + (level.saturating_sub(1) / 5) as usize).min(5)
}

/// Vehicles per spawn burst
pub fn simultaneous_cars(level: u32) -> usize {
    (1 + (level / 5) as usize).min(5)
}
