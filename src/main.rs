//! Snake Duel entry point
//!
//! In the browser this wires the canvas, keyboard and LocalStorage to a session.
//! Natively it plays a headless match between two autopilots and prints the board.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

    use snake_duel::persistence::LocalStore;
    use snake_duel::renderer::{DrawCommand, Frame, Renderer, draw_list};
    use snake_duel::sim::PlayerId;
    use snake_duel::{Session, Tuning};

    /// Canvas 2D backend
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, frame: &Frame) {
            for command in draw_list(frame) {
                match command {
                    DrawCommand::Clear { width, height } => {
                        self.ctx.clear_rect(0.0, 0.0, width, height);
                    }
                    DrawCommand::Rect {
                        x,
                        y,
                        w,
                        h,
                        fill,
                        stroke,
                    } => {
                        self.ctx.set_fill_style_str(&fill);
                        self.ctx.fill_rect(x, y, w, h);
                        if let Some(stroke) = stroke {
                            self.ctx.set_stroke_style_str(stroke);
                            self.ctx.set_line_width(2.0);
                            self.ctx.stroke_rect(x, y, w, h);
                        }
                    }
                    DrawCommand::Glyph { text, x, y, size } => {
                        self.ctx.set_font(&format!("{}px Arial", size));
                        let _ = self.ctx.fill_text(text, x, y);
                    }
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        renderer: CanvasRenderer,
    }

    impl Game {
        /// Update score widgets and the game-over banner in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let widgets = [
                (PlayerId::One, "player1-score"),
                (PlayerId::Two, "player2-score"),
            ];
            for (id, el_id) in widgets {
                if let Some(el) = document.get_element_by_id(el_id) {
                    el.set_text_content(Some(&self.session.score_line(id)));
                }
            }
            if let Some(el) = document.get_element_by_id("settings") {
                el.set_text_content(Some(&self.session.settings.summary()));
            }

            let message = self.session.game_over_message();
            if let Some(el) = document.get_element_by_id("game-over-message") {
                el.set_text_content(message.as_deref());
            }
            if let Some(el) = document
                .get_element_by_id("game-over")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if message.is_some() { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Snake Duel starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2d context has an unexpected type");
                    return;
                }
            },
            _ => {
                log::error!("Canvas 2d context unavailable");
                return;
            }
        };

        let tuning = Tuning::for_canvas(canvas.width(), snake_duel::consts::GRID_SIZE);
        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(seed, tuning, LocalStore);
        session.start();
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer { ctx },
        }));
        game.borrow().update_hud();

        setup_keyboard(game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Snake Duel running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if matches!(
                key.as_str(),
                " " | "ArrowLeft" | "ArrowUp" | "ArrowRight" | "ArrowDown"
            ) {
                event.prevent_default();
            }
            let mut g = game.borrow_mut();
            match key.as_str() {
                "p" => g.session.cycle_fruit_preset(),
                "f" => g.session.toggle_forgiving_turns(),
                _ => {
                    g.session.key_down(&key);
                    return;
                }
            }
            g.update_hud();
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let restarted = {
                    let mut g = game.borrow_mut();
                    let restarted = g.session.restart();
                    g.update_hud();
                    restarted
                };
                if restarted {
                    log::info!("Game restarted");
                    request_animation_frame(game.clone());
                }
            });
            let _ =
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let keep_running = {
            let mut g = game.borrow_mut();
            let Game { session, renderer } = &mut *g;
            let keep_running = session.frame(time, renderer);
            g.update_hud();
            keep_running
        };

        // Game over stops the loop; the restart button schedules it again.
        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Duel (native) starting...");
    log::info!("Native mode plays a headless autopilot match - build for wasm32 to play");

    let seed = std::env::var("SNAKE_DUEL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let store_path =
        std::env::var("SNAKE_DUEL_STORE").unwrap_or_else(|_| "snake_duel_store.json".to_string());

    let outcome = headless::play(seed, snake_duel::Tuning::load(), &store_path);
    println!("{}", outcome.board);
    println!();
    println!("{}", outcome.message);
    for line in outcome.scores {
        println!("{}", line);
    }
    if std::env::var_os("SNAKE_DUEL_JSON").is_some() {
        println!("{}", outcome.snapshot);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::IVec2;

    use snake_duel::persistence::{FileStore, KeyValueStore};
    use snake_duel::{FruitPreset, Session, Tuning};
    use snake_duel::renderer::{Frame, TextRenderer};
    use snake_duel::sim::{GameState, PlayerId};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time (ms)
    const MATCH_LIMIT_MS: f64 = 180_000.0;

    pub struct MatchReport {
        pub board: String,
        pub message: String,
        pub scores: Vec<String>,
        /// Final frame as JSON
        pub snapshot: String,
    }

    /// Key names for each player: left, up, right, down, fire
    fn keys(id: PlayerId) -> [&'static str; 5] {
        match id {
            PlayerId::One => ["ArrowLeft", "ArrowUp", "ArrowRight", "ArrowDown", " "],
            PlayerId::Two => ["a", "w", "d", "s", "e"],
        }
    }

    const DIRS: [IVec2; 4] = [
        IVec2::new(-1, 0),
        IVec2::new(0, -1),
        IVec2::new(1, 0),
        IVec2::new(0, 1),
    ];

    /// Toroidal Manhattan distance
    fn distance(a: IVec2, b: IVec2, n: i32) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(n - dx) + dy.min(n - dy)
    }

    /// Pick the safe direction that gets closest to the nearest fruit
    fn choose_key(state: &GameState, id: PlayerId) -> Option<&'static str> {
        let me = state.player(id);
        let n = state.grid.tile_count;
        let reverse = -me.heading();
        let blocked = |cell: IVec2| state.players.iter().any(|p| p.occupies(cell));

        DIRS.iter()
            .enumerate()
            .filter(|&(_, &dir)| dir != reverse)
            .map(|(i, &dir)| (i, state.grid.wrap(me.pos + dir)))
            .filter(|&(_, cell)| !blocked(cell))
            .min_by_key(|&(_, cell)| {
                state
                    .fruits
                    .iter()
                    .map(|f| distance(cell, f.pos, n))
                    .min()
                    .unwrap_or(0)
            })
            .map(|(i, _)| keys(id)[i])
    }

    /// Apply `SNAKE_DUEL_PRESET` and `SNAKE_DUEL_FORGIVING` on top of the stored settings
    fn apply_env_settings<S: KeyValueStore>(session: &mut Session<S>) {
        let mut settings = session.settings.clone();
        if let Ok(name) = std::env::var("SNAKE_DUEL_PRESET") {
            match FruitPreset::from_str(&name) {
                Some(preset) => settings.fruit_preset = preset,
                None => log::warn!(
                    "Unknown fruit preset {:?}, keeping {}",
                    name,
                    settings.fruit_preset.as_str()
                ),
            }
        }
        if let Ok(value) = std::env::var("SNAKE_DUEL_FORGIVING") {
            settings.forgiving_turns = matches!(value.as_str(), "1" | "true" | "on");
        }
        if settings != session.settings {
            session.update_settings(settings);
        }
    }

    pub fn play(seed: u64, tuning: Tuning, store_path: &str) -> MatchReport {
        let mut session = Session::new(seed, tuning, FileStore::new(store_path));
        let mut renderer = TextRenderer::default();
        apply_env_settings(&mut session);
        session.start();
        log::info!("Headless match with seed {} ({})", seed, session.settings.summary());

        let mut now = 0.0;
        while now < MATCH_LIMIT_MS {
            now += FRAME_MS;
            for id in PlayerId::BOTH {
                if let Some(key) = choose_key(&session.state, id) {
                    session.key_down(key);
                }
                if session.state.player(id).has_laser {
                    session.key_down(keys(id)[4]);
                }
            }
            if !session.frame(now, &mut renderer) {
                break;
            }
        }

        let message = session
            .game_over_message()
            .unwrap_or_else(|| "Time limit reached".to_string());
        log::info!(
            "{} after {:.1}s, {} frames drawn",
            message,
            now / 1000.0,
            renderer.frames_rendered
        );

        let snapshot = match serde_json::to_string_pretty(&Frame::capture(&session.state)) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize final frame: {}", e);
                String::new()
            }
        };

        MatchReport {
            board: renderer.last,
            snapshot,
            message,
            scores: PlayerId::BOTH.iter().map(|&id| session.score_line(id)).collect(),
        }
    }
}
