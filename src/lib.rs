//! Road Rush - A top-down arcade driving game
//!
//! Core modules:
//! - `sim`: Simulation (traffic, boss fights, collisions, level progression)
//! - `render`: Frame drawing against an abstract surface
//! - `platform`: Browser/native collaborators (storage, keyboard)
//! - `highscores`: Top-10 leaderboard persistence
//! - `settings`: Player preferences
//! - `i18n`: Translation lookup

pub mod highscores;
pub mod i18n;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, ScoreError};
pub use i18n::{Lang, translate};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration; all per-frame tunables are expressed against it
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Frame gaps above this are treated as a stall (tab in background)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Drivable road
    pub const ROAD_START: f32 = 20.0;
    pub const ROAD_END: f32 = 380.0;

    /// Lane centres, left to right
    pub const LANES: [f32; 6] = [33.0, 100.0, 167.0, 234.0, 301.0, 367.0];
    /// Fallback lane for out-of-range lookups
    pub const CENTER_LANE: usize = 2;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 550.0;
    pub const PLAYER_HITBOX_WIDTH: f32 = 24.0;
    pub const PLAYER_HITBOX_HEIGHT: f32 = 30.0;
    pub const PLAYER_MIN_X: f32 = 5.0;
    pub const PLAYER_MAX_X: f32 = 395.0;
    pub const PLAYER_MAX_SPEED: f32 = 5.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const STARTING_LIVES: i32 = 5;

    /// Progression
    pub const MAX_LEVEL: u32 = 25;
    pub const LEVEL_DURATION_MS: f32 = 30_000.0;
    pub const BOSS_DURATION_MS: f32 = 10_000.0;
    pub const LIVES_PER_5_LEVELS: i32 = 5;

    /// Countdown: three digits, half a second each
    pub const COUNTDOWN_START: u8 = 3;
    pub const COUNTDOWN_DIGIT_MS: f32 = 500.0;

    /// Frame-unit timers
    pub const COLLISION_EFFECT_FRAMES: f32 = 15.0;
    pub const NOTIFICATION_FRAMES: f32 = 120.0;

    /// Double-tap window for Escape to quit
    pub const ESCAPE_WINDOW_MS: f64 = 1000.0;
}

/// Centre of a lane; out-of-range indices fall back to the centre lane
#[inline]
pub fn lane_center(index: usize) -> f32 {
    consts::LANES
        .get(index)
        .copied()
        .unwrap_or(consts::LANES[consts::CENTER_LANE])
}

/// Convert a frame delta in milliseconds to reference-frame units
#[inline]
pub fn frame_multiplier(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_FRAME_MS
}
