//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the front-end owns
//! one instance and threads it through every tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Vehicle types sharing the road with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Moto,
    Truck,
}

impl VehicleKind {
    /// Collision box (width, height)
    pub fn hitbox(self) -> Vec2 {
        match self {
            VehicleKind::Car => Vec2::new(25.0, 35.0),
            VehicleKind::Moto => Vec2::new(20.0, 28.0),
            VehicleKind::Truck => Vec2::new(35.0, 180.0),
        }
    }

    /// Drawn sprite size (width, height)
    pub fn sprite_size(self) -> Vec2 {
        match self {
            VehicleKind::Car => Vec2::new(30.0, 40.0),
            VehicleKind::Moto => Vec2::new(80.0, 30.0),
            VehicleKind::Truck => Vec2::new(100.0, 200.0),
        }
    }

    /// Number of colour variants available for the sprite
    pub fn variants(self) -> u8 {
        match self {
            VehicleKind::Car => 5,
            VehicleKind::Moto | VehicleKind::Truck => 3,
        }
    }

    /// Speed relative to the level's base car speed
    pub fn speed_offset(self) -> f32 {
        match self {
            VehicleKind::Car => 0.0,
            VehicleKind::Moto => 1.0,
            VehicleKind::Truck => -1.0,
        }
    }
}

/// Lateral oscillation parameters for motos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zigzag {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

/// A vehicle driving down the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    /// Lane the vehicle is easing toward
    pub target_x: f32,
    /// Spawn x, the centre of the zigzag
    pub initial_x: f32,
    /// Speed in units per reference frame
    pub speed: f32,
    pub kind: VehicleKind,
    /// Sprite colour variant
    pub variant: u8,
    /// Lane slot the vehicle was spawned in (motos roam freely)
    pub lane: Option<usize>,
    pub can_change_lane: bool,
    /// Time since the last lane change (ms)
    pub since_lane_change_ms: f32,
    /// Already counted as dodged
    pub scored: bool,
    pub zigzag: Option<Zigzag>,
    /// Distance travelled since spawn
    pub traveled: f32,
    /// Vertical distance covered by the last step
    pub last_step: f32,
}

impl Vehicle {
    pub fn new(kind: VehicleKind, pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            target_x: pos.x,
            initial_x: pos.x,
            speed,
            kind,
            variant: 0,
            lane: None,
            can_change_lane: false,
            since_lane_change_ms: LANE_CHANGE_INTERVAL_MS,
            scored: false,
            zigzag: None,
            traveled: 0.0,
            last_step: 0.0,
        }
    }
}

/// Minimum time between two lane changes of one vehicle
pub const LANE_CHANGE_INTERVAL_MS: f32 = 2000.0;

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// +5 points
    Star,
    /// +1 life
    Heart,
}

/// A collectible falling down the road
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub pos: Vec2,
    pub kind: BonusKind,
}

/// A hostile shot moving in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Bomb lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombPhase {
    Flying,
    Exploding,
}

/// Explosion length in reference frames
pub const BOMB_EXPLOSION_FRAMES: f32 = 60.0;
/// Explosions only hurt while the timer is above this
pub const BOMB_ACTIVE_THRESHOLD: f32 = 30.0;

/// A bomb lobbed by the boss at the player's predicted position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub target: Vec2,
    /// Explosion frames remaining (only meaningful while exploding)
    pub timer: f32,
    pub radius: f32,
    pub phase: BombPhase,
    /// Already cost the player a life
    pub has_hit: bool,
}

/// One pending shot of a boss volley
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledShot {
    pub angle: f32,
    /// Offset from the start of the volley (ms)
    pub delay_ms: f32,
}

/// A boss volley being fired shot by shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotSequence {
    pub shots: Vec<ScheduledShot>,
    /// Next shot to fire
    pub index: usize,
    /// Time since the volley started (ms)
    pub elapsed_ms: f32,
}

/// A boss wingman firing straight down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ally {
    pub pos: Vec2,
    pub cooldown_ms: f32,
}

/// The boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    /// +1 right, -1 left
    pub move_direction: f32,
    pub allies: Vec<Ally>,
    pub sequence: Option<ShotSequence>,
    /// Time until the next volley may start (ms)
    pub shot_cooldown_ms: f32,
    /// Time until the next bomb (ms)
    pub bomb_cooldown_ms: f32,
    pub is_leaving: bool,
    pub exit_speed: f32,
    /// Time since the boss entered (ms)
    pub elapsed_ms: f32,
    /// Sprite variant
    pub variant: u8,
}

/// Boss sprite half height; once `y` is above `-BOSS_HALF_HEIGHT` it is off-screen
pub const BOSS_HALF_HEIGHT: f32 = 30.0;
pub const BOSS_START: Vec2 = Vec2::new(200.0, 50.0);

impl Boss {
    pub fn new(level: u32, variant: u8) -> Self {
        let allies = if level >= 10 {
            (0..level / 20)
                .map(|i| Ally {
                    pos: Vec2::new(100.0 + i as f32 * 100.0, 80.0),
                    cooldown_ms: 0.0,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            pos: BOSS_START,
            move_direction: 1.0,
            allies,
            sequence: None,
            shot_cooldown_ms: 0.0,
            bomb_cooldown_ms: 0.0,
            is_leaving: false,
            exit_speed: 0.0,
            elapsed_ms: 0.0,
            variant,
        }
    }
}

/// Explosion sprite shown where a hit landed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEffect {
    pub pos: Vec2,
    /// Frames remaining
    pub timer: f32,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub velocity_x: f32,
    /// Frames of crash flicker remaining
    pub crash_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            velocity_x: 0.0,
            crash_timer: 0.0,
        }
    }
}

impl Player {
    /// Integrate keyboard steering for one tick. Acceleration is progressive,
    /// releasing both keys stops the car dead.
    pub fn steer(&mut self, left: bool, right: bool, fm: f32) {
        if left && self.pos.x > ROAD_START {
            self.velocity_x =
                (self.velocity_x - PLAYER_ACCELERATION * fm).max(-PLAYER_MAX_SPEED);
        } else if right && self.pos.x < ROAD_END {
            self.velocity_x = (self.velocity_x + PLAYER_ACCELERATION * fm).min(PLAYER_MAX_SPEED);
        } else {
            self.velocity_x = 0.0;
        }
        self.pos.x = (self.pos.x + self.velocity_x * fm).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
    }
}

/// What to do once the countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    StartGame { level: u32 },
    Resume,
}

/// Pre-game / resume countdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Countdown {
    #[default]
    Idle,
    CountingDown {
        /// Digit currently shown (3, 2, 1)
        value: u8,
        /// Time left on the current digit (ms)
        remaining_ms: f32,
        then: PendingAction,
    },
}

impl Countdown {
    pub fn start(then: PendingAction) -> Self {
        Countdown::CountingDown {
            value: COUNTDOWN_START,
            remaining_ms: COUNTDOWN_DIGIT_MS,
            then,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Countdown::CountingDown { .. })
    }
}

/// Spawner override used by the debug menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnPolicy {
    #[default]
    Normal,
    /// Every spawned vehicle has this kind
    ForceType(VehicleKind),
    /// No traffic, a boss is always on screen
    PermanentBoss,
}

impl SpawnPolicy {
    /// Any debug override makes the player invulnerable
    pub fn is_debug(self) -> bool {
        self != SpawnPolicy::Normal
    }
}

/// Level / boss progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Regular traffic
    Normal,
    /// Boss on screen and attacking
    BossActive,
    /// Boss flying off, traffic already back
    BossLeaving,
}

/// Ephemeral on-screen messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    BonusPoints(u32),
    BonusLives(i32),
}

/// Lifecycle events drained by the front-end every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Notify(Notice),
    BossEntered { level: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32, level: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub running: bool,
    pub paused: bool,
    /// Current level (1..=MAX_LEVEL)
    pub level: u32,
    pub score: u32,
    pub lives: i32,
    /// Time left before the boss shows up (ms)
    pub time_left_ms: f32,
    pub player: Player,
    pub countdown: Countdown,
    pub policy: SpawnPolicy,
    pub phase: LevelPhase,
    /// Time spent in the current level (ms)
    pub level_elapsed_ms: f32,
    pub car_spawn_cooldown_ms: f32,
    pub bonus_spawn_cooldown_ms: f32,
    pub cars: Vec<Vehicle>,
    pub bonuses: Vec<Bonus>,
    pub projectiles: Vec<Projectile>,
    pub bombs: Vec<Bomb>,
    pub boss: Option<Boss>,
    pub collision_effect: Option<CollisionEffect>,
    /// Escape presses inside the current double-tap window
    pub escape_presses: u8,
    pub escape_window_ms: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            running: false,
            paused: false,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            time_left_ms: LEVEL_DURATION_MS,
            player: Player::default(),
            countdown: Countdown::Idle,
            policy: SpawnPolicy::Normal,
            phase: LevelPhase::Normal,
            level_elapsed_ms: 0.0,
            car_spawn_cooldown_ms: 0.0,
            bonus_spawn_cooldown_ms: 0.0,
            cars: Vec::new(),
            bonuses: Vec::new(),
            projectiles: Vec::new(),
            bombs: Vec::new(),
            boss: None,
            collision_effect: None,
            escape_presses: 0,
            escape_window_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Reset everything a run accumulates; RNG, policy and pending events survive
    pub fn reset_run(&mut self, level: u32) {
        self.running = true;
        self.paused = false;
        self.level = level.clamp(1, MAX_LEVEL);
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.time_left_ms = LEVEL_DURATION_MS;
        self.player = Player::default();
        self.phase = LevelPhase::Normal;
        self.level_elapsed_ms = 0.0;
        self.car_spawn_cooldown_ms = 0.0;
        self.bonus_spawn_cooldown_ms = 0.0;
        self.cars.clear();
        self.bonuses.clear();
        self.projectiles.clear();
        self.bombs.clear();
        self.boss = None;
        self.collision_effect = None;
        self.escape_presses = 0;
        self.escape_window_ms = 0.0;
    }

    /// Whether the front-end should keep scheduling frames
    pub fn is_active(&self) -> bool {
        self.running || self.countdown.is_active()
    }

    /// Boss is on screen and traffic is held back
    pub fn boss_mode(&self) -> bool {
        self.phase == LevelPhase::BossActive
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Register a hit at `pos`: flicker the player and show an explosion
    pub fn register_hit(&mut self, pos: Vec2, crash_frames: f32) {
        self.lives -= 1;
        self.player.crash_timer = crash_frames;
        self.collision_effect = Some(CollisionEffect {
            pos,
            timer: COLLISION_EFFECT_FRAMES,
        });
    }

    /// Stop the run if the player is out of lives (debug runs never end)
    pub fn check_game_over(&mut self) {
        if self.lives <= 0 && !self.policy.is_debug() {
            self.end_game();
        }
    }

    /// Stop the run and announce it once
    pub fn end_game(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::info!(
            "Game over: score {} at level {}",
            self.score,
            self.level
        );
        self.push_event(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert!(!state.running);
        assert!(!state.is_active());
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.boss.is_none());
    }

    #[test]
    fn test_reset_run_clears_entities() {
        let mut state = GameState::new(1);
        state.cars.push(Vehicle::new(VehicleKind::Car, Vec2::ZERO, 3.0));
        state.score = 40;
        state.lives = 1;
        state.reset_run(40);
        assert!(state.running);
        assert!(state.cars.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_game_over_emitted_once() {
        let mut state = GameState::new(1);
        state.reset_run(1);
        state.lives = 0;
        state.check_game_over();
        state.check_game_over();
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::GameOver { score: 0, level: 1 }]
        );
        assert!(!state.running);
    }

    #[test]
    fn test_debug_policy_is_invulnerable() {
        let mut state = GameState::new(1);
        state.reset_run(1);
        state.policy = SpawnPolicy::ForceType(VehicleKind::Truck);
        state.lives = -3;
        state.check_game_over();
        assert!(state.running);
    }

    #[test]
    fn test_steer_accelerates_and_stops() {
        let mut player = Player::default();
        player.steer(false, true, 1.0);
        assert_eq!(player.velocity_x, 0.5);
        assert_eq!(player.pos.x, PLAYER_START_X + 0.5);
        for _ in 0..20 {
            player.steer(false, true, 1.0);
        }
        assert_eq!(player.velocity_x, PLAYER_MAX_SPEED);
        player.steer(false, false, 1.0);
        assert_eq!(player.velocity_x, 0.0);
    }

    #[test]
    fn test_steer_clamped_to_road() {
        let mut player = Player::default();
        for _ in 0..500 {
            player.steer(true, false, 3.0);
        }
        assert!(player.pos.x >= PLAYER_MIN_X);
        assert!(player.pos.x <= ROAD_START);
    }

    proptest::proptest! {
        #[test]
        fn prop_player_stays_on_road(
            inputs in proptest::collection::vec((proptest::bool::ANY, proptest::bool::ANY, 0.0f32..6.0), 0..400)
        ) {
            let mut player = Player::default();
            for (left, right, fm) in inputs {
                player.steer(left, right, fm);
                proptest::prop_assert!((PLAYER_MIN_X..=PLAYER_MAX_X).contains(&player.pos.x));
            }
        }
    }

    #[test]
    fn test_boss_allies_by_level() {
        assert!(Boss::new(9, 0).allies.is_empty());
        assert!(Boss::new(19, 0).allies.is_empty());
        assert_eq!(Boss::new(20, 0).allies.len(), 1);
        assert_eq!(Boss::new(25, 0).allies[0].pos, Vec2::new(100.0, 80.0));
    }
}
