//! Traffic and bonus spawners
//!
//! Both spawners are gated by cooldown counters that the tick decrements; a
//! spawner that fires resets its own counter.

use glam::Vec2;
use rand::Rng;

use super::level::{LevelConfig, simultaneous_cars};
use super::state::{
    Bonus, BonusKind, GameState, SpawnPolicy, Vehicle, VehicleKind, Zigzag,
};
use crate::consts::LANES;
use crate::lane_center;

/// Vertical gap between vehicles of one burst
const BURST_SPACING: f32 = 80.0;
/// Spawn row for vehicles (above the canvas)
const CAR_SPAWN_Y: f32 = -50.0;
/// Spawn row for bonuses
const BONUS_SPAWN_Y: f32 = -30.0;
/// Bonuses never spawn closer than this to a vehicle
const BONUS_CLEARANCE: f32 = 80.0;
const BONUS_SPAWN_ATTEMPTS: usize = 10;
/// Lane-centre jitter for cars and trucks (total width)
const LANE_JITTER: f32 = 30.0;

/// Weighted vehicle draw: 15% moto, 10% truck, 75% car
pub fn roll_vehicle_kind(rng: &mut impl Rng) -> VehicleKind {
    let roll: f32 = rng.random();
    if roll < 0.15 {
        VehicleKind::Moto
    } else if roll < 0.25 {
        VehicleKind::Truck
    } else {
        VehicleKind::Car
    }
}

/// Weighted bonus draw: 25% heart, 75% star
pub fn roll_bonus_kind(rng: &mut impl Rng) -> BonusKind {
    if rng.random_bool(0.25) {
        BonusKind::Heart
    } else {
        BonusKind::Star
    }
}

/// Whether vehicles may spawn this tick
fn traffic_allowed(state: &GameState) -> bool {
    match state.policy {
        SpawnPolicy::PermanentBoss => false,
        // Forced types keep coming even while a boss is up
        SpawnPolicy::ForceType(_) => true,
        SpawnPolicy::Normal => !state.boss_mode(),
    }
}

/// Spawn a burst of vehicles if the cooldown elapsed and there is room
pub fn spawn_cars(state: &mut GameState, cfg: &LevelConfig) {
    if !traffic_allowed(state)
        || state.car_spawn_cooldown_ms > 0.0
        || state.cars.len() >= cfg.max_cars
    {
        return;
    }

    let burst = simultaneous_cars(state.level);
    let mut free_lanes: Vec<usize> = (0..LANES.len()).collect();

    for i in 0..burst {
        if state.cars.len() >= cfg.max_cars || free_lanes.is_empty() {
            break;
        }
        let pick = state.rng.random_range(0..free_lanes.len());
        let lane = free_lanes.swap_remove(pick);
        let vehicle = build_vehicle(state, cfg, lane, i);
        log::debug!(
            "Spawned {:?} at ({:.0}, {:.0})",
            vehicle.kind,
            vehicle.pos.x,
            vehicle.pos.y
        );
        state.cars.push(vehicle);
    }

    state.car_spawn_cooldown_ms = cfg.car_spawn_rate;
}

fn build_vehicle(state: &mut GameState, cfg: &LevelConfig, lane: usize, slot: usize) -> Vehicle {
    let kind = match state.policy {
        SpawnPolicy::ForceType(kind) => kind,
        _ => roll_vehicle_kind(&mut state.rng),
    };
    let rng = &mut state.rng;

    let x = if kind == VehicleKind::Moto {
        // Motos ignore lanes
        30.0 + rng.random::<f32>() * 340.0
    } else {
        lane_center(lane) + (rng.random::<f32>() - 0.5) * LANE_JITTER
    };
    let y = CAR_SPAWN_Y - slot as f32 * BURST_SPACING;

    let mut vehicle = Vehicle::new(kind, Vec2::new(x, y), cfg.car_speed + kind.speed_offset());
    vehicle.variant = rng.random_range(0..kind.variants());

    if kind == VehicleKind::Moto {
        vehicle.zigzag = Some(Zigzag {
            amplitude: 15.0 + rng.random::<f32>() * 18.0,
            frequency: 0.02 + rng.random::<f32>() * 0.03,
            phase: rng.random::<f32>() * std::f32::consts::TAU,
        });
    } else {
        vehicle.lane = Some(lane);
        vehicle.can_change_lane =
            kind == VehicleKind::Car && state.level >= 3 && rng.random_bool(0.3);
    }

    vehicle
}

/// Spawn one bonus on a lane that is clear of traffic, if the cooldown elapsed.
/// When no clear lane is found the spawn is lost, not deferred.
pub fn spawn_bonus(state: &mut GameState, cfg: &LevelConfig) {
    if state.boss_mode() || state.bonus_spawn_cooldown_ms > 0.0 {
        return;
    }
    state.bonus_spawn_cooldown_ms = cfg.bonus_spawn_rate;

    for _ in 0..BONUS_SPAWN_ATTEMPTS {
        let lane = state.rng.random_range(0..LANES.len());
        let candidate = Vec2::new(lane_center(lane), BONUS_SPAWN_Y);
        let blocked = state
            .cars
            .iter()
            .any(|car| car.pos.distance(candidate) < BONUS_CLEARANCE);
        if !blocked {
            let kind = roll_bonus_kind(&mut state.rng);
            log::debug!("Spawned {:?} bonus in lane {}", kind, lane);
            state.bonuses.push(Bonus {
                pos: candidate,
                kind,
            });
            return;
        }
    }

    log::debug!("Bonus spawn skipped: no clear lane");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::level_config;
    use crate::sim::state::LevelPhase;

    fn running_state(level: u32) -> GameState {
        let mut state = GameState::new(7);
        state.reset_run(level);
        state
    }

    #[test]
    fn test_burst_uses_distinct_lanes() {
        let mut state = running_state(25);
        state.policy = SpawnPolicy::ForceType(VehicleKind::Car);
        let cfg = level_config(25);
        spawn_cars(&mut state, &cfg);

        assert_eq!(state.cars.len(), 5);
        let mut lanes: Vec<usize> = state.cars.iter().filter_map(|c| c.lane).collect();
        lanes.sort_unstable();
        lanes.dedup();
        assert_eq!(lanes.len(), 5);
        // Staggered rows
        for (i, car) in state.cars.iter().enumerate() {
            assert_eq!(car.pos.y, -50.0 - i as f32 * 80.0);
        }
        assert_eq!(state.car_spawn_cooldown_ms, cfg.car_spawn_rate);
    }

    #[test]
    fn test_cooldown_and_capacity_gate() {
        let mut state = running_state(1);
        let cfg = level_config(1);
        state.car_spawn_cooldown_ms = 10.0;
        spawn_cars(&mut state, &cfg);
        assert!(state.cars.is_empty());

        state.car_spawn_cooldown_ms = 0.0;
        for _ in 0..cfg.max_cars {
            state.cars.push(Vehicle::new(VehicleKind::Car, Vec2::new(100.0, 300.0), 2.0));
        }
        spawn_cars(&mut state, &cfg);
        assert_eq!(state.cars.len(), cfg.max_cars);
    }

    #[test]
    fn test_no_traffic_during_boss() {
        let mut state = running_state(3);
        state.phase = LevelPhase::BossActive;
        spawn_cars(&mut state, &level_config(3));
        spawn_bonus(&mut state, &level_config(3));
        assert!(state.cars.is_empty());
        assert!(state.bonuses.is_empty());

        state.policy = SpawnPolicy::ForceType(VehicleKind::Moto);
        spawn_cars(&mut state, &level_config(3));
        assert!(!state.cars.is_empty());
        assert!(state.cars.iter().all(|c| c.kind == VehicleKind::Moto));
    }

    #[test]
    fn test_permanent_boss_blocks_traffic() {
        let mut state = running_state(3);
        state.policy = SpawnPolicy::PermanentBoss;
        spawn_cars(&mut state, &level_config(3));
        assert!(state.cars.is_empty());
    }

    #[test]
    fn test_moto_gets_zigzag_and_no_lane() {
        let mut state = running_state(5);
        state.policy = SpawnPolicy::ForceType(VehicleKind::Moto);
        spawn_cars(&mut state, &level_config(5));
        for moto in &state.cars {
            let zigzag = moto.zigzag.expect("motos zigzag");
            assert!((15.0..=33.0).contains(&zigzag.amplitude));
            assert!((30.0..=370.0).contains(&moto.pos.x));
            assert!(moto.lane.is_none());
            assert!(!moto.can_change_lane);
        }
    }

    #[test]
    fn test_bonus_skipped_when_lanes_blocked() {
        let mut state = running_state(1);
        for &x in LANES.iter() {
            state.cars.push(Vehicle::new(VehicleKind::Car, Vec2::new(x, -30.0), 2.0));
        }
        let cfg = level_config(1);
        spawn_bonus(&mut state, &cfg);
        assert!(state.bonuses.is_empty());
        // Lost, not deferred
        assert_eq!(state.bonus_spawn_cooldown_ms, cfg.bonus_spawn_rate);
    }

    #[test]
    fn test_bonus_spawns_on_lane() {
        let mut state = running_state(1);
        spawn_bonus(&mut state, &level_config(1));
        assert_eq!(state.bonuses.len(), 1);
        assert!(LANES.contains(&state.bonuses[0].pos.x));
        assert_eq!(state.bonuses[0].pos.y, -30.0);
    }

    #[test]
    fn test_kind_weights_roughly_hold() {
        let mut state = running_state(1);
        let mut motos = 0;
        let mut trucks = 0;
        for _ in 0..10_000 {
            match roll_vehicle_kind(&mut state.rng) {
                VehicleKind::Moto => motos += 1,
                VehicleKind::Truck => trucks += 1,
                VehicleKind::Car => {}
            }
        }
        assert!((1200..1800).contains(&motos), "motos: {motos}");
        assert!((700..1300).contains(&trucks), "trucks: {trucks}");
    }
}
