//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only enters through the `dt_ms` passed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod level;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod step;
pub mod tick;

pub use collision::{Aabb, player_hitbox, resolve_collisions};
pub use level::{LevelConfig, level_config};
pub use progression::boss_progress;
pub use state::{
    Ally, Bomb, BombPhase, Bonus, BonusKind, Boss, CollisionEffect, Countdown, GameEvent,
    GameState, LevelPhase, Notice, PendingAction, Player, Projectile, SpawnPolicy, Vehicle,
    VehicleKind,
};
pub use tick::{
    FrameClock, Hud, TickInput, adjust_debug_level, hud, request_start, tick, toggle_pause,
};
