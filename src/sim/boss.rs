//! Boss movement and attack sequencing

use glam::Vec2;
use rand::Rng;

use super::level::{boss_bomb_cooldown, boss_shot_cooldown, boss_volley_size};
use super::state::{
    BOSS_HALF_HEIGHT, Bomb, BombPhase, Boss, GameState, LevelPhase, Projectile, ScheduledShot,
    ShotSequence,
};
use crate::frame_multiplier;

/// Patrol range for the boss
const PATROL_MIN_X: f32 = 50.0;
const PATROL_MAX_X: f32 = 350.0;
const PATROL_SPEED: f32 = 1.0;
/// Upward acceleration while leaving, per reference frame
const EXIT_ACCELERATION: f32 = 0.2;
/// Aim never points higher than this vertical offset
const MIN_AIM_DY: f32 = 50.0;
/// Angular spacing of a volley fan (radians)
const VOLLEY_SPREAD: f32 = 0.25;
/// Gap between two shots of a volley (ms)
const SHOT_GAP_MIN_MS: f32 = 100.0;
const SHOT_GAP_MAX_MS: f32 = 300.0;
/// Muzzle offsets below the boss / allies
const BOSS_MUZZLE: Vec2 = Vec2::new(0.0, 30.0);
const BOMB_MUZZLE: Vec2 = Vec2::new(0.0, 20.0);
const ALLY_MUZZLE: Vec2 = Vec2::new(0.0, 20.0);
const ALLY_SHOT_SPEED: f32 = 4.0;
/// Level from which the boss lobs bombs
const BOMB_MIN_LEVEL: u32 = 20;
/// Bomb aim looks this many frames ahead of the player
const BOMB_LEAD_FRAMES: f32 = 30.0;

/// Speed of boss projectiles at a level
pub fn boss_shot_speed(level: u32) -> f32 {
    2.0 + level as f32 * 0.1
}

/// Plan a fan of shots aimed at the player, with strictly increasing delays
pub fn build_volley(level: u32, from: Vec2, player: Vec2, rng: &mut impl Rng) -> ShotSequence {
    let count = boss_volley_size(level);
    let dx = player.x - from.x;
    let dy = (player.y - from.y).max(MIN_AIM_DY);
    let base_angle = dy.atan2(dx);

    let mut delay_ms = 0.0;
    let shots = (0..count)
        .map(|i| {
            if i > 0 {
                delay_ms += rng.random_range(SHOT_GAP_MIN_MS..=SHOT_GAP_MAX_MS);
            }
            let offset = (i as f32 - (count / 2) as f32) * VOLLEY_SPREAD;
            ScheduledShot {
                angle: base_angle + offset,
                delay_ms,
            }
        })
        .collect();

    ShotSequence {
        shots,
        index: 0,
        elapsed_ms: 0.0,
    }
}

/// Advance the boss: exit animation, or patrol and attack
pub fn update_boss(state: &mut GameState, dt_ms: f32) {
    let Some(mut boss) = state.boss.take() else {
        return;
    };
    let fm = frame_multiplier(dt_ms);

    if boss.is_leaving {
        boss.exit_speed += EXIT_ACCELERATION * fm;
        boss.pos.y -= boss.exit_speed * fm;
        if boss.pos.y < -BOSS_HALF_HEIGHT {
            log::info!("Boss left the screen");
            if state.phase == LevelPhase::BossLeaving {
                state.phase = LevelPhase::Normal;
            }
        } else {
            state.boss = Some(boss);
        }
        return;
    }

    patrol(&mut boss, fm);
    run_volley(state, &mut boss, dt_ms);
    if state.level >= BOMB_MIN_LEVEL {
        lob_bomb(state, &mut boss, dt_ms);
    }
    fire_allies(state, &mut boss, dt_ms);

    state.boss = Some(boss);
}

fn patrol(boss: &mut Boss, fm: f32) {
    boss.pos.x += boss.move_direction * PATROL_SPEED * fm;
    if boss.pos.x <= PATROL_MIN_X || boss.pos.x >= PATROL_MAX_X {
        boss.pos.x = boss.pos.x.clamp(PATROL_MIN_X, PATROL_MAX_X);
        boss.move_direction = -boss.move_direction;
    }
}

fn run_volley(state: &mut GameState, boss: &mut Boss, dt_ms: f32) {
    boss.shot_cooldown_ms -= dt_ms;
    if let Some(sequence) = boss.sequence.as_mut() {
        sequence.elapsed_ms += dt_ms;
    } else if boss.shot_cooldown_ms <= 0.0 {
        boss.sequence = Some(build_volley(
            state.level,
            boss.pos,
            state.player.pos,
            &mut state.rng,
        ));
        boss.shot_cooldown_ms = boss_shot_cooldown(state.level);
    }

    let Some(sequence) = boss.sequence.as_mut() else {
        return;
    };
    let speed = boss_shot_speed(state.level);
    while let Some(shot) = sequence.shots.get(sequence.index) {
        if sequence.elapsed_ms < shot.delay_ms {
            break;
        }
        state.projectiles.push(Projectile {
            pos: boss.pos + BOSS_MUZZLE,
            vel: Vec2::new(shot.angle.cos(), shot.angle.sin()) * speed,
        });
        sequence.index += 1;
    }
    if sequence.index >= sequence.shots.len() {
        boss.sequence = None;
    }
}

fn lob_bomb(state: &mut GameState, boss: &mut Boss, dt_ms: f32) {
    boss.bomb_cooldown_ms -= dt_ms;
    if boss.bomb_cooldown_ms > 0.0 {
        return;
    }
    let player = &state.player;
    let predicted_x = (player.pos.x + player.velocity_x * BOMB_LEAD_FRAMES)
        .clamp(PATROL_MIN_X, PATROL_MAX_X);

    state.bombs.push(Bomb {
        pos: boss.pos + BOMB_MUZZLE,
        target: Vec2::new(predicted_x, player.pos.y),
        timer: 0.0,
        radius: 50.0 + state.level as f32,
        phase: BombPhase::Flying,
        has_hit: false,
    });
    boss.bomb_cooldown_ms = boss_bomb_cooldown(state.level);
}

fn fire_allies(state: &mut GameState, boss: &mut Boss, dt_ms: f32) {
    let cooldown = boss_shot_cooldown(state.level) * 2.0;
    for ally in &mut boss.allies {
        ally.cooldown_ms -= dt_ms;
        if ally.cooldown_ms <= 0.0 {
            state.projectiles.push(Projectile {
                pos: ally.pos + ALLY_MUZZLE,
                vel: Vec2::new(0.0, ALLY_SHOT_SPEED),
            });
            ally.cooldown_ms = cooldown;
        }
    }
}
