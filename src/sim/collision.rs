//! Collision detection and response against the player's car
//!
//! Vehicles use axis-aligned boxes; bonuses, projectiles and explosions use
//! circular proximity. Each collection is filtered in one pass and every
//! side effect is applied exactly once per entity.

use glam::Vec2;

use super::state::{
    BOMB_ACTIVE_THRESHOLD, BombPhase, BonusKind, GameEvent, GameState, Notice, Vehicle,
};
use crate::consts::{PLAYER_HITBOX_HEIGHT, PLAYER_HITBOX_WIDTH};

/// Pickup radius for bonuses
pub const BONUS_PICKUP_RADIUS: f32 = 25.0;
/// Hit radius for projectiles
pub const PROJECTILE_HIT_RADIUS: f32 = 15.0;
/// Points for a star
pub const STAR_POINTS: u32 = 5;

/// Crash flicker lengths (reference frames) per damage source
const CAR_CRASH_FRAMES: f32 = 20.0;
const PROJECTILE_CRASH_FRAMES: f32 = 15.0;
const BOMB_CRASH_FRAMES: f32 = 30.0;

/// An axis-aligned box given by its centre and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Strict overlap: touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_min = self.center - self.size / 2.0;
        let a_max = self.center + self.size / 2.0;
        let b_min = other.center - other.size / 2.0;
        let b_max = other.center + other.size / 2.0;
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// The player's collision box
pub fn player_hitbox(pos: Vec2) -> Aabb {
    Aabb::new(pos, Vec2::new(PLAYER_HITBOX_WIDTH, PLAYER_HITBOX_HEIGHT))
}

/// Resolve every player collision for this tick
pub fn resolve_collisions(state: &mut GameState) {
    resolve_vehicles(state);
    resolve_bonuses(state);
    resolve_projectiles(state);
    resolve_bombs(state);
}

fn resolve_vehicles(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_box = player_hitbox(player_pos);
    let mut hits = Vec::new();

    state.cars.retain(|car| {
        if player_box.overlaps(&swept_hitbox(car)) {
            hits.push((player_pos + car.pos) / 2.0);
            false
        } else {
            true
        }
    });

    for midpoint in hits {
        log::debug!("Crashed into traffic at ({:.0}, {:.0})", midpoint.x, midpoint.y);
        state.register_hit(midpoint, CAR_CRASH_FRAMES);
        state.check_game_over();
    }
}

/// A vehicle's box stretched back over the distance it covered this tick,
/// so long frames cannot carry it through the player
fn swept_hitbox(car: &Vehicle) -> Aabb {
    let size = car.kind.hitbox();
    Aabb::new(
        Vec2::new(car.pos.x, car.pos.y - car.last_step / 2.0),
        Vec2::new(size.x, size.y + car.last_step),
    )
}

fn resolve_bonuses(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut picked = Vec::new();

    state.bonuses.retain(|bonus| {
        if bonus.pos.distance(player_pos) < BONUS_PICKUP_RADIUS {
            picked.push(bonus.kind);
            false
        } else {
            true
        }
    });

    for kind in picked {
        match kind {
            BonusKind::Heart => {
                state.lives += 1;
                state.push_event(GameEvent::Notify(Notice::BonusLives(1)));
            }
            BonusKind::Star => {
                state.score += STAR_POINTS;
                state.push_event(GameEvent::Notify(Notice::BonusPoints(STAR_POINTS)));
            }
        }
    }
}

fn resolve_projectiles(state: &mut GameState) {
    let player_pos = state.player.pos;
    let before = state.projectiles.len();
    state
        .projectiles
        .retain(|proj| proj.pos.distance(player_pos) >= PROJECTILE_HIT_RADIUS);

    for _ in state.projectiles.len()..before {
        state.register_hit(player_pos, PROJECTILE_CRASH_FRAMES);
        state.check_game_over();
    }
}

fn resolve_bombs(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut hits = 0;

    for bomb in &mut state.bombs {
        if bomb.phase == BombPhase::Exploding
            && bomb.timer > BOMB_ACTIVE_THRESHOLD
            && !bomb.has_hit
            && bomb.pos.distance(player_pos) < bomb.radius
        {
            bomb.has_hit = true;
            hits += 1;
        }
    }

    for _ in 0..hits {
        state.register_hit(player_pos, BOMB_CRASH_FRAMES);
        state.check_game_over();
    }
}
