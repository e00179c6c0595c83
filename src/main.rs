//! Road Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement,
        HtmlInputElement,
    };

    use road_rush::highscores::{HighScores, ScoreError, today};
    use road_rush::platform::{
        Keyboard, KeyCommand, LocalStorage, MemoryStorage, Notification, NotificationQueue,
        NotificationSink, Storage,
    };
    use road_rush::render::{Surface, SpriteKind, draw_frame};
    use road_rush::settings::{LEVEL_PRESETS, Settings, debug_menu_choice};
    use road_rush::sim::progression::BOSS_VARIANTS;
    use road_rush::sim::{
        BonusKind, FrameClock, GameEvent, GameState, VehicleKind, adjust_debug_level, hud,
        request_start, tick, toggle_pause,
    };
    use road_rush::i18n::debug_mode_lines;
    use road_rush::{Lang, translate};

    /// How long the level-up banner stays up (ms)
    const LEVEL_BANNER_MS: f32 = 2000.0;

    const CAR_COLORS: [&str; 5] = ["red", "blue", "green", "yellow", "purple"];
    const SMALL_COLORS: [&str; 3] = ["red", "blue", "green"];

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn input_element(id: &str) -> Option<HtmlInputElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    /// 2D canvas backed surface with the sprite sheet
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        images: HashMap<SpriteKind, HtmlImageElement>,
    }

    impl CanvasSurface {
        fn new(ctx: CanvasRenderingContext2d) -> Self {
            let mut surface = Self {
                ctx,
                images: HashMap::new(),
            };
            surface.load(SpriteKind::Player, "svg/vehicules/player.svg");
            for (i, color) in CAR_COLORS.iter().enumerate() {
                let kind = SpriteKind::Vehicle {
                    kind: VehicleKind::Car,
                    variant: i as u8,
                };
                surface.load(kind, &format!("svg/vehicules/car-{color}.svg"));
            }
            for (i, color) in SMALL_COLORS.iter().enumerate() {
                for (kind, prefix) in [(VehicleKind::Truck, "truck"), (VehicleKind::Moto, "moto")] {
                    let sprite = SpriteKind::Vehicle {
                        kind,
                        variant: i as u8,
                    };
                    surface.load(sprite, &format!("svg/vehicules/{prefix}-{color}.svg"));
                }
            }
            for i in 0..BOSS_VARIANTS {
                surface.load(SpriteKind::Boss(i), &format!("svg/bosses/boss-{}.svg", i + 1));
            }
            surface.load(SpriteKind::Bonus(BonusKind::Star), "svg/misc/star-bonus.svg");
            surface.load(SpriteKind::Bonus(BonusKind::Heart), "svg/misc/heart-bonus.svg");
            surface.load(SpriteKind::Explosion, "svg/misc/explosion.svg");
            surface
        }

        fn load(&mut self, kind: SpriteKind, src: &str) {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(src);
                    self.images.insert(kind, img);
                }
                Err(e) => log::warn!("Could not create image for {src}: {e:?}"),
            }
        }

        fn is_loaded(&self, kind: SpriteKind) -> bool {
            self.images
                .get(&kind)
                .is_some_and(|img| img.complete() && img.natural_width() > 0)
        }

        /// Images a game cannot start without
        fn essentials_ready(&self) -> bool {
            [
                SpriteKind::Player,
                SpriteKind::Explosion,
                SpriteKind::Bonus(BonusKind::Star),
            ]
            .into_iter()
            .all(|kind| self.is_loaded(kind))
        }
    }

    impl Surface for CanvasSurface {
        fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx
                .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }

        fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: &str) {
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(width as f64);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.stroke();
        }

        fn sprite(&mut self, kind: SpriteKind, center: Vec2, size: Vec2, tinted: bool) -> bool {
            if !self.is_loaded(kind) {
                return false;
            }
            let Some(img) = self.images.get(&kind) else {
                return false;
            };
            if tinted {
                self.ctx.set_filter("hue-rotate(180deg) brightness(1.5)");
            }
            let origin = center - size / 2.0;
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                origin.x as f64,
                origin.y as f64,
                size.x as f64,
                size.y as f64,
            );
            if tinted {
                self.ctx.set_filter("none");
            }
            true
        }

        fn text(&mut self, text: &str, pos: Vec2, size_px: f32, color: &str, outline: bool) {
            self.ctx.set_font(&format!("bold {size_px}px Arial"));
            self.ctx.set_text_align("center");
            if outline {
                self.ctx.set_stroke_style_str("#ffffff");
                self.ctx.set_line_width(3.0);
                let _ = self.ctx.stroke_text(text, pos.x as f64, pos.y as f64);
            }
            self.ctx.set_fill_style_str(color);
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ctx.set_global_alpha(alpha as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        scores: HighScores,
        storage: Box<dyn Storage>,
        keyboard: Keyboard,
        clock: FrameClock,
        notifications: NotificationQueue,
        surface: CanvasSurface,
        /// Start requested while images were still loading
        pending_start: Option<u32>,
        /// Whether an animation frame is scheduled
        looping: bool,
        /// Game-over form is waiting for a name
        awaiting_name: bool,
        level_banner_ms: f32,
    }

    impl Game {
        fn lang(&self) -> Lang {
            self.settings.lang
        }

        /// Queue a new game; it begins once the essential images are ready
        fn start(&mut self, level: u32) {
            if self.state.is_active() {
                return;
            }
            self.pending_start = Some(level);
        }

        fn try_begin(&mut self) {
            let Some(level) = self.pending_start else {
                return;
            };
            if !self.surface.essentials_ready() {
                return;
            }
            self.pending_start = None;
            self.awaiting_name = false;
            self.keyboard.clear_presses();
            self.notifications.clear();
            self.state.policy = self.settings.policy;
            request_start(&mut self.state, level);

            set_visible("startScreen", false);
            set_visible("gameOverScreen", false);
            self.update_debug_info();
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            self.try_begin();

            let input = self.keyboard.take_input();
            tick(&mut self.state, &input, dt);
            self.notifications.advance(dt);

            for event in self.state.drain_events() {
                self.handle_event(event);
            }

            if self.level_banner_ms > 0.0 {
                self.level_banner_ms -= dt;
                if self.level_banner_ms <= 0.0 {
                    set_visible("levelUpMessage", false);
                }
            }

            draw_frame(
                &mut self.surface,
                &self.state,
                self.lang(),
                time,
                self.notifications.current(),
            );
            self.update_hud();
        }

        fn keeps_running(&self) -> bool {
            self.state.is_active() || self.pending_start.is_some() || self.level_banner_ms > 0.0
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Notify(notice) => {
                    let notification = Notification::from_notice(notice, self.lang());
                    self.notifications.notify(notification);
                }
                GameEvent::BossEntered { .. } => {}
                GameEvent::LevelUp { level } => {
                    let text = translate(self.lang(), "levelUp", &[("level", level.to_string())]);
                    set_text("levelUpMessage", &text);
                    set_visible("levelUpMessage", true);
                    self.level_banner_ms = LEVEL_BANNER_MS;
                }
                GameEvent::GameOver { score, .. } => self.show_game_over(score),
            }
        }

        fn update_hud(&self) {
            let hud = hud(&self.state);
            set_text("score", &hud.score.to_string());
            set_text("lives", &hud.lives.to_string());
            set_text("levelDisplay", &hud.level.to_string());
            set_text("time", &hud.seconds_left.to_string());
            if let Some(el) = document().and_then(|d| d.get_element_by_id("bossProgress")) {
                let _ = el.set_attribute(
                    "style",
                    &format!("width: {:.0}%", hud.boss_progress * 100.0),
                );
            }
            set_text("bestScore", &self.scores.best_score.max(hud.score).to_string());
            self.update_debug_info();
        }

        fn update_debug_info(&self) {
            let Some(el) = document().and_then(|d| d.get_element_by_id("debugInfo")) else {
                return;
            };
            let lines = debug_mode_lines(self.state.policy, self.state.level, self.lang());
            match lines.as_deref().and_then(|l| l.split_first()) {
                Some((title, rest)) => {
                    el.set_inner_html(&format!("<strong>{title}</strong><br>{}", rest.join("<br>")));
                    set_visible("debugInfo", true);
                }
                None => set_visible("debugInfo", false),
            }
        }

        fn show_game_over(&mut self, score: u32) {
            let lang = self.lang();
            set_text(
                "finalScore",
                &format!("{}: {score}", translate(lang, "finalScore", &[])),
            );
            if let Some(input) = input_element("playerName") {
                input.set_value(&self.scores.last_player_name);
                let _ = input.focus();
            }
            self.awaiting_name = true;
            set_visible("scoreForm", true);
            set_visible("gameOverScreen", true);
            self.render_leaderboard();
        }

        fn save_score(&mut self) {
            let name = input_element("playerName")
                .map(|input| input.value())
                .unwrap_or_default();
            let (score, level) = (self.state.score, self.state.level);
            match self
                .scores
                .save_score(&mut self.storage, &name, score, level, &today())
            {
                Ok(_) => {
                    self.awaiting_name = false;
                    self.render_leaderboard();
                    set_visible("scoreForm", false);
                    set_visible("gameOverScreen", false);
                    set_visible("startScreen", true);
                }
                Err(ScoreError::EmptyName) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&translate(
                            self.lang(),
                            "nameRequired",
                            &[],
                        ));
                    }
                }
                Err(e) => log::warn!("Could not save score: {e}"),
            }
        }

        fn reset_scores(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let lang = self.lang();
            let confirmed = window
                .confirm_with_message(&translate(lang, "resetConfirm", &[]))
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            match self.scores.reset(&mut self.storage) {
                Ok(()) => {
                    let _ = window.alert_with_message(&translate(lang, "scoresReset", &[]));
                }
                Err(e) => log::warn!("Could not reset scores: {e}"),
            }
            self.render_leaderboard();
            self.update_hud();
        }

        fn render_leaderboard(&self) {
            let Some(list) = document().and_then(|d| d.get_element_by_id("scoresList")) else {
                return;
            };
            if self.scores.is_empty() {
                list.set_text_content(Some(&translate(self.lang(), "noScores", &[])));
                return;
            }
            let level_label = translate(self.lang(), "level", &[]);
            let lines: Vec<String> = self
                .scores
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    format!(
                        "{}. {} - {} ({level_label} {}) {}",
                        i + 1,
                        e.name,
                        e.score,
                        e.level,
                        e.date
                    )
                })
                .collect();
            list.set_text_content(Some(&lines.join("\n")));
        }

        fn apply_translations(&self) {
            let lang = self.lang();
            for key in [
                "title",
                "startGame",
                "chooseLevel",
                "bestScores",
                "enterName",
                "saveScore",
                "backToMenu",
                "resetScores",
                "progress",
            ] {
                set_text(&format!("i18n-{key}"), &translate(lang, key, &[]));
            }
            for key in ["arrows", "pause", "restart", "debug", "enter", "escape"] {
                let key = format!("controls.{key}");
                set_text(&format!("i18n-{key}"), &translate(lang, &key, &[]));
            }
            for (level, key) in LEVEL_PRESETS {
                set_text(&format!("preset-{level}"), &translate(lang, key, &[]));
            }
            for other in Lang::all() {
                set_text(&format!("lang-{}", other.code()), other.name());
            }
            if let Some(doc) = document() {
                doc.set_title(&translate(lang, "title", &[]));
                if let Some(root) = doc.document_element() {
                    let _ = root.set_attribute("lang", lang.code());
                }
            }
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(&mut self.storage) {
                log::warn!("Could not save settings: {e}");
            }
        }

        fn starting_level(&mut self) -> u32 {
            if let Some(slider) = input_element("levelSlider") {
                if let Ok(level) = slider.value().parse() {
                    self.settings.set_starting_level(level);
                    self.save_settings();
                }
            }
            self.settings.starting_level
        }

        fn open_debug_menu(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let prompt = "Debug\n\n1. Normal\n2. Cars only\n3. Trucks only\n4. Motos only\n5. Permanent boss";
            let answer = window.prompt_with_message(prompt).ok().flatten();
            let Some(policy) = answer.as_deref().and_then(debug_menu_choice) else {
                return;
            };
            self.settings.policy = policy;
            log::info!("Debug policy: {policy:?}");
            let level = self.starting_level();
            self.start(level);
        }

        /// Commands that act outside the simulation tick
        fn handle_command(&mut self, cmd: KeyCommand) {
            match cmd {
                KeyCommand::Start => {
                    if self.awaiting_name {
                        self.save_score();
                    } else if !self.state.is_active() {
                        let level = self.starting_level();
                        self.start(level);
                    }
                }
                KeyCommand::Restart => {
                    if !self.state.is_active() && !self.awaiting_name {
                        self.start(1);
                    }
                }
                KeyCommand::Debug => {
                    if !self.state.is_active() && !self.awaiting_name {
                        self.open_debug_menu();
                    }
                }
                KeyCommand::LevelUp => adjust_debug_level(&mut self.state, 1),
                KeyCommand::LevelDown => adjust_debug_level(&mut self.state, -1),
                KeyCommand::Pause | KeyCommand::Escape => {}
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Road Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, scores will not persist");
                Box::new(MemoryStorage::new())
            }
        };

        let browser_lang = window.navigator().language().unwrap_or_default();
        let settings = Settings::load(&storage, Settings::for_browser_language(&browser_lang));
        let scores = HighScores::load(&storage);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            settings,
            scores,
            storage,
            keyboard: Keyboard::new(),
            clock: FrameClock::new(),
            notifications: NotificationQueue::new(),
            surface: CanvasSurface::new(ctx),
            pending_start: None,
            looping: false,
            awaiting_name: false,
            level_banner_ms: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        {
            let g = game.borrow();
            g.apply_translations();
            g.render_leaderboard();
            g.update_hud();
            if let Some(slider) = input_element("levelSlider") {
                slider.set_value(&g.settings.starting_level.to_string());
            }
        }

        setup_input_handlers(game.clone())?;
        setup_buttons(game.clone())?;
        setup_auto_pause(game)?;

        log::info!("Road Rush ready!");
        Ok(())
    }

    /// Schedule frames unless the loop is already running
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping || !g.keeps_running() {
                return;
            }
            g.looping = true;
            g.clock.reset();
        }
        request_animation_frame(game.clone());
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                let cmd = game.borrow_mut().keyboard.key_down(&key);
                if let Some(cmd) = cmd {
                    game.borrow_mut().handle_command(cmd);
                }
                ensure_loop(&game);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(
        id: &str,
        game: Rc<RefCell<Game>>,
        action: impl Fn(&mut Game) + 'static,
    ) -> Result<(), JsValue> {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            action(&mut game.borrow_mut());
            ensure_loop(&game);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        on_click("startBtn", game.clone(), |g| {
            let level = g.starting_level();
            g.start(level);
        })?;
        on_click("saveScoreBtn", game.clone(), Game::save_score)?;
        on_click("resetScoresBtn", game.clone(), Game::reset_scores)?;
        for lang in Lang::all() {
            on_click(&format!("lang-{}", lang.code()), game.clone(), move |g| {
                g.settings.lang = lang;
                g.save_settings();
                g.apply_translations();
                g.render_leaderboard();
            })?;
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame(time);
            let keep_going = g.keeps_running();
            if !keep_going {
                g.looping = false;
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Window blur (click outside, tab switch)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            // A modal prompt may still hold the game
            let Ok(mut g) = game.try_borrow_mut() else {
                return;
            };
            g.keyboard.release_all();
            if g.state.running && !g.state.paused {
                toggle_pause(&mut g.state);
                if g.state.paused {
                    log::info!("Auto-paused (window blur)");
                }
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use road_rush::consts::{PLAYER_MAX_X, PLAYER_MIN_X, REFERENCE_FRAME_MS};
    use road_rush::highscores::{HighScores, today};
    use road_rush::platform::{MemoryStorage, Notification};
    use road_rush::sim::{GameEvent, GameState, TickInput, request_start, tick};
    use road_rush::{Lang, translate};

    /// Longest autopilot run, in reference frames (five minutes)
    const MAX_FRAMES: u32 = 60 * 300;
    /// How far ahead the autopilot looks for traffic
    const LOOKAHEAD: f32 = 180.0;

    /// Steer away from the closest threat in front of the player
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.pos;
        let threat = state
            .cars
            .iter()
            .map(|c| c.pos)
            .chain(state.projectiles.iter().map(|p| p.pos))
            .filter(|p| p.y < player.y + 20.0 && p.y > player.y - LOOKAHEAD)
            .filter(|p| (p.x - player.x).abs() < 40.0)
            .max_by(|a, b| a.y.total_cmp(&b.y));

        let Some(threat) = threat else {
            return TickInput::default();
        };
        let go_left = if player.x < PLAYER_MIN_X + 60.0 {
            false
        } else if player.x > PLAYER_MAX_X - 60.0 {
            true
        } else {
            threat.x >= player.x
        };
        TickInput {
            left: go_left,
            right: !go_left,
            ..Default::default()
        }
    }

    pub fn run(seed: u64, level: u32) {
        let lang = Lang::En;
        let mut state = GameState::new(seed);
        request_start(&mut state, level);

        let mut frames = 0;
        while state.is_active() && frames < MAX_FRAMES {
            let input = autopilot(&state);
            tick(&mut state, &input, REFERENCE_FRAME_MS);
            frames += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::Notify(notice) => {
                        log::debug!("{}", Notification::from_notice(notice, lang).text);
                    }
                    GameEvent::BossEntered { level } => log::info!("Boss at level {level}"),
                    GameEvent::LevelUp { level } => log::info!(
                        "{}",
                        translate(lang, "levelUp", &[("level", level.to_string())])
                    ),
                    GameEvent::GameOver { .. } => {}
                }
            }
        }
        state.end_game();
        state.drain_events();

        let mut storage = MemoryStorage::new();
        let mut scores = HighScores::load(&storage);
        match scores.save_score(&mut storage, "autopilot", state.score, state.level, &today()) {
            Ok(rank) => log::info!("Autopilot ranked {rank:?}"),
            Err(e) => log::warn!("Could not save score: {e}"),
        }

        println!(
            "{}: {} | {}: {} | {} frames",
            translate(lang, "score", &[]),
            state.score,
            translate(lang, "level", &[]),
            state.level,
            frames
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Road Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let level = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    headless::run(seed, level);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
