//! Frame drawing
//!
//! Draws a `GameState` onto any [`Surface`]. The browser front-end backs the
//! surface with a 2D canvas; tests record the calls.

use glam::Vec2;

use crate::consts::*;
use crate::i18n::{Lang, translate};
use crate::platform::ActiveNotification;
use crate::sim::state::BOMB_EXPLOSION_FRAMES;
use crate::sim::{BombPhase, BonusKind, Countdown, GameState, VehicleKind};

/// Lane divider x positions
const LANE_DIVIDERS: [f32; 5] = [66.0, 133.0, 200.0, 267.0, 334.0];
/// Divider dash spacing and length
const DASH_PERIOD: f32 = 30.0;
const DASH_LENGTH: f32 = 15.0;
/// Divider scroll speed (units per ms)
const LINE_SPEED: f64 = 0.1;

const PLAYER_SPRITE: Vec2 = Vec2::new(36.0, 50.0);
const BONUS_SPRITE: Vec2 = Vec2::new(24.0, 24.0);
const BOSS_SPRITE: Vec2 = Vec2::new(100.0, 60.0);
const ALLY_SIZE: Vec2 = Vec2::new(20.0, 16.0);

const ROAD_COLOR: &str = "#2c3e50";
const DIVIDER_COLOR: &str = "#5a6b7d";
const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.7)";

/// Images the front-end loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Vehicle { kind: VehicleKind, variant: u8 },
    Boss(u8),
    Bonus(BonusKind),
    Explosion,
}

/// Drawing primitives
pub trait Surface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: &str);
    /// Draw `kind` centred on `center`. `tinted` marks the crash flash.
    /// Returns false when the image is not available yet.
    fn sprite(&mut self, kind: SpriteKind, center: Vec2, size: Vec2, tinted: bool) -> bool;
    /// Centred text; `outline` draws a white stroke behind it
    fn text(&mut self, text: &str, pos: Vec2, size_px: f32, color: &str, outline: bool);
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw one complete frame
pub fn draw_frame(
    surface: &mut impl Surface,
    state: &GameState,
    lang: Lang,
    time_ms: f64,
    notification: Option<&ActiveNotification>,
) {
    draw_road(surface, time_ms);

    for car in &state.cars {
        let kind = SpriteKind::Vehicle {
            kind: car.kind,
            variant: car.variant,
        };
        surface.sprite(kind, car.pos, car.kind.sprite_size(), false);
    }
    for bonus in &state.bonuses {
        if !surface.sprite(SpriteKind::Bonus(bonus.kind), bonus.pos, BONUS_SPRITE, false) {
            let color = match bonus.kind {
                BonusKind::Star => "#f1c40f",
                BonusKind::Heart => "#e74c3c",
            };
            surface.fill_circle(bonus.pos, 10.0, color);
        }
    }

    draw_boss(surface, state);
    draw_shots(surface, state);
    draw_player(surface, state);
    draw_collision_effect(surface, state);

    if let Some(active) = notification {
        surface.set_alpha(active.opacity());
        surface.text(
            &active.notification.text,
            Vec2::new(CANVAS_WIDTH / 2.0, active.y),
            32.0,
            active.notification.color,
            true,
        );
        surface.set_alpha(1.0);
    }

    if let Countdown::CountingDown { value, .. } = state.countdown {
        draw_overlay(
            surface,
            &COUNTDOWN_OVERLAY,
            &value.to_string(),
            &translate(lang, "preparingGame", &[]),
        );
    } else if state.paused {
        draw_overlay(
            surface,
            &PAUSE_OVERLAY,
            &translate(lang, "pause", &[]),
            &translate(lang, "resumeGame", &[]),
        );
    }
}

fn draw_road(surface: &mut impl Surface, time_ms: f64) {
    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        ROAD_COLOR,
    );

    let offset = ((time_ms * LINE_SPEED) % DASH_PERIOD as f64) as f32;
    for x in LANE_DIVIDERS {
        let mut y = -DASH_PERIOD;
        while y < CANVAS_HEIGHT + DASH_PERIOD {
            surface.fill_rect(
                Vec2::new(x - 1.0, y + offset),
                Vec2::new(2.0, DASH_LENGTH),
                DIVIDER_COLOR,
            );
            y += DASH_PERIOD;
        }
    }
}

fn draw_boss(surface: &mut impl Surface, state: &GameState) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    if !surface.sprite(SpriteKind::Boss(boss.variant), boss.pos, BOSS_SPRITE, false) {
        surface.fill_rect(boss.pos - Vec2::new(15.0, 10.0), Vec2::new(30.0, 20.0), "#e74c3c");
        surface.fill_rect(boss.pos - Vec2::new(35.0, 5.0), Vec2::new(15.0, 10.0), "#34495e");
        surface.fill_rect(boss.pos + Vec2::new(20.0, -5.0), Vec2::new(15.0, 10.0), "#34495e");
    }
    for ally in &boss.allies {
        surface.fill_rect(ally.pos - ALLY_SIZE / 2.0, ALLY_SIZE, "#9b59b6");
    }
}

fn draw_shots(surface: &mut impl Surface, state: &GameState) {
    for proj in &state.projectiles {
        surface.fill_circle(proj.pos, 3.0, "#f39c12");
    }

    for bomb in &state.bombs {
        match bomb.phase {
            BombPhase::Flying => {
                surface.fill_circle(bomb.pos, 6.0, "#e74c3c");
                surface.stroke_circle(bomb.pos, 10.0, 3.0, "rgba(231, 76, 60, 0.4)");
                surface.stroke_circle(bomb.target, 30.0, 2.0, "rgba(231, 76, 60, 0.2)");
            }
            BombPhase::Exploding => {
                let progress = (BOMB_EXPLOSION_FRAMES - bomb.timer) / BOMB_EXPLOSION_FRAMES;
                let radius = bomb.radius * progress;
                let opacity = (1.0 - progress).max(0.0);
                surface.fill_circle(
                    bomb.pos,
                    radius,
                    &format!("rgba(255, 100, 0, {:.2})", opacity * 0.6),
                );
                surface.stroke_circle(
                    bomb.pos,
                    radius,
                    4.0,
                    &format!("rgba(231, 76, 60, {opacity:.2})"),
                );
                if progress < 0.5 {
                    surface.fill_circle(
                        bomb.pos,
                        radius * 0.3,
                        &format!("rgba(255, 255, 100, {:.2})", opacity * 0.8),
                    );
                }
            }
        }
    }
}

fn draw_player(surface: &mut impl Surface, state: &GameState) {
    let crash = state.player.crash_timer;
    let shake = if crash > 0.0 {
        (crash * 0.5).sin() * 2.0
    } else {
        0.0
    };
    surface.sprite(
        SpriteKind::Player,
        state.player.pos + Vec2::new(shake, 0.0),
        PLAYER_SPRITE,
        crash > 0.0,
    );
}

fn draw_collision_effect(surface: &mut impl Surface, state: &GameState) {
    let Some(effect) = state.collision_effect else {
        return;
    };
    // Quick burst, then shrink
    let size = if effect.timer > 10.0 {
        (COLLISION_EFFECT_FRAMES - effect.timer) * 12.0
    } else {
        effect.timer * 6.0
    };
    if !surface.sprite(SpriteKind::Explosion, effect.pos, Vec2::splat(size), false) {
        surface.fill_circle(effect.pos, size / 4.0, "#ffff00");
    }
}

/// Text placement of a full-screen overlay, relative to the canvas centre
struct OverlayLayout {
    headline_px: f32,
    headline_dy: f32,
    subtitle_dy: f32,
}

/// Big digit with the "get ready" line above it
const COUNTDOWN_OVERLAY: OverlayLayout = OverlayLayout {
    headline_px: 72.0,
    headline_dy: 20.0,
    subtitle_dy: -50.0,
};

/// PAUSE with the resume hint below it
const PAUSE_OVERLAY: OverlayLayout = OverlayLayout {
    headline_px: 48.0,
    headline_dy: -20.0,
    subtitle_dy: 30.0,
};

fn draw_overlay(surface: &mut impl Surface, layout: &OverlayLayout, headline: &str, subtitle: &str) {
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.fill_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        OVERLAY_COLOR,
    );
    surface.text(
        headline,
        center + Vec2::new(0.0, layout.headline_dy),
        layout.headline_px,
        "#ffffff",
        false,
    );
    surface.text(
        subtitle,
        center + Vec2::new(0.0, layout.subtitle_dy),
        20.0,
        "#bdc3c7",
        false,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bomb, Vehicle};
    use crate::sim::{PendingAction, progression::start_boss};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect(String),
        Circle(String),
        Stroke,
        Sprite(SpriteKind, bool),
        Text(String),
        Alpha,
    }

    /// Records draw calls; sprites report as loaded unless `missing` says so
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        texts: Vec<(String, Vec2)>,
        sprites_missing: bool,
    }

    impl Recorder {
        fn text_y(&self, text: &str) -> Option<f32> {
            self.texts.iter().find(|(t, _)| t == text).map(|(_, pos)| pos.y)
        }
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, color: &str) {
            self.ops.push(Op::Rect(color.to_string()));
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, color: &str) {
            self.ops.push(Op::Circle(color.to_string()));
        }
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _width: f32, _color: &str) {
            self.ops.push(Op::Stroke);
        }
        fn sprite(&mut self, kind: SpriteKind, _center: Vec2, _size: Vec2, tinted: bool) -> bool {
            self.ops.push(Op::Sprite(kind, tinted));
            !self.sprites_missing
        }
        fn text(&mut self, text: &str, pos: Vec2, _size_px: f32, _color: &str, _outline: bool) {
            self.ops.push(Op::Text(text.to_string()));
            self.texts.push((text.to_string(), pos));
        }
        fn set_alpha(&mut self, _alpha: f32) {
            self.ops.push(Op::Alpha);
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(3);
        state.reset_run(1);
        state
    }

    #[test]
    fn test_draws_traffic_and_player() {
        let mut state = running_state();
        let mut car = Vehicle::new(VehicleKind::Truck, Vec2::new(100.0, 100.0), 3.0);
        car.variant = 2;
        state.cars.push(car);

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, Lang::En, 0.0, None);

        assert_eq!(surface.ops[0], Op::Rect(ROAD_COLOR.to_string()));
        assert!(surface.ops.contains(&Op::Sprite(
            SpriteKind::Vehicle {
                kind: VehicleKind::Truck,
                variant: 2
            },
            false
        )));
        assert_eq!(
            surface.ops.last(),
            Some(&Op::Sprite(SpriteKind::Player, false))
        );
    }

    #[test]
    fn test_crash_tints_player() {
        let mut state = running_state();
        state.player.crash_timer = 10.0;
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, Lang::En, 0.0, None);
        assert!(surface.ops.contains(&Op::Sprite(SpriteKind::Player, true)));
    }

    #[test]
    fn test_countdown_overlay_localized() {
        let mut state = GameState::new(3);
        state.countdown = crate::sim::Countdown::start(PendingAction::StartGame { level: 1 });
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, Lang::Fr, 0.0, None);
        assert!(surface.ops.contains(&Op::Text("3".to_string())));
        assert!(surface.ops.contains(&Op::Text("Préparez-vous...".to_string())));
        // Subtitle sits above the digit
        let digit = surface.text_y("3").unwrap();
        let subtitle = surface.text_y("Préparez-vous...").unwrap();
        assert!(subtitle < digit);
    }

    #[test]
    fn test_pause_overlay() {
        let mut state = running_state();
        state.paused = true;
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, Lang::En, 0.0, None);
        assert!(surface.ops.contains(&Op::Rect(OVERLAY_COLOR.to_string())));
        assert!(surface.ops.contains(&Op::Text("Press P to resume".to_string())));
        // Headline above the centre, hint below it
        let center_y = CANVAS_HEIGHT / 2.0;
        assert_eq!(surface.text_y("PAUSE"), Some(center_y - 20.0));
        assert_eq!(surface.text_y("Press P to resume"), Some(center_y + 30.0));
    }

    #[test]
    fn test_fallback_shapes_when_sprites_missing() {
        let mut state = running_state();
        start_boss(&mut state);
        state.bombs.push(Bomb {
            pos: Vec2::new(200.0, 300.0),
            target: Vec2::new(200.0, 550.0),
            timer: 0.0,
            radius: 60.0,
            phase: BombPhase::Flying,
            has_hit: false,
        });
        let mut surface = Recorder {
            sprites_missing: true,
            ..Default::default()
        };
        draw_frame(&mut surface, &state, Lang::En, 0.0, None);
        assert!(surface.ops.contains(&Op::Rect("#e74c3c".to_string())));
        assert!(surface.ops.contains(&Op::Circle("#e74c3c".to_string())));
        assert_eq!(
            surface.ops.iter().filter(|op| **op == Op::Stroke).count(),
            2
        );
    }
}
