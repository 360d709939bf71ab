//! Skydrift entry point
//!
//! Wires the simulation to the page: canvas sizing, input events, HUD text,
//! the overlay, the leaderboard modal and the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        HtmlInputElement, KeyboardEvent, MouseEvent, PointerEvent,
    };

    use skydrift::api::{self, DEFAULT_LEADERBOARD_LIMIT, ScoreSubmission};
    use skydrift::consts::MAX_FRAME_DT;
    use skydrift::render::draw_frame;
    use skydrift::score::BestDistance;
    use skydrift::sim::{GameMode, World, home_position, update};

    /// Game instance holding all state the frame loop touches
    struct Game {
        world: World,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        /// Whether the first laid-out frame has seated the ball yet
        seated: bool,
        /// Best value actually written to storage, so the summary screen
        /// doesn't rewrite it every frame
        saved_best: u32,
    }

    impl Game {
        fn new(
            canvas: HtmlCanvasElement,
            ctx: CanvasRenderingContext2d,
            best: u32,
            seed: u64,
        ) -> Self {
            Self {
                // Real surface size arrives with the first layout; until
                // then the world is a 1x1 placeholder
                world: World::new(1.0, 1.0, best, seed),
                canvas,
                ctx,
                last_time: 0.0,
                seated: false,
                saved_best: best,
            }
        }

        /// Match the backing buffer to the displayed size, scaled by the
        /// device pixel ratio. Returns false while layout reports a zero
        /// rect, in which case nothing should be simulated or drawn.
        fn sync_surface(&mut self) -> bool {
            let rect = self.canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return false;
            }

            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let px_w = (rect.width() * dpr).floor() as u32;
            let px_h = (rect.height() * dpr).floor() as u32;
            if self.canvas.width() != px_w || self.canvas.height() != px_h {
                self.canvas.set_width(px_w);
                self.canvas.set_height(px_h);
                let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
                self.world.resize(rect.width() as f32, rect.height() as f32);
            }
            true
        }

        /// One animation frame: clamp the timestep, advance, draw, refresh
        /// the DOM around the canvas.
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = time;

            if self.sync_surface() {
                if !self.seated {
                    // First laid-out frame: seat the ball for the menu view
                    self.seated = true;
                    self.world.ball.pos = home_position(self.world.width, self.world.height);
                }
                update(&mut self.world, dt);
                draw_frame(&self.ctx, &self.world);
            }

            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            self.update_hud(&document);
            self.sync_overlay(&document);
            self.poll_run_end();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("uiScore") {
                el.set_text_content(Some(&(self.world.distance as u32).to_string()));
            }
            if let Some(el) = document.get_element_by_id("uiCoins") {
                el.set_text_content(Some(&self.world.coins_collected.to_string()));
            }
            if let Some(el) = document.get_element_by_id("uiBest") {
                el.set_text_content(Some(&self.world.best_distance.to_string()));
            }
        }

        /// Keep the overlay in step with the current mode.
        fn sync_overlay(&self, document: &Document) {
            match self.world.mode {
                GameMode::Menu => show_overlay(
                    document,
                    "Skydrift",
                    "Tap / Space to flap • Enemy touch = game over • Fall = game over",
                    "Start",
                ),
                GameMode::Play => hide_overlay(document),
                GameMode::Pause => show_overlay(
                    document,
                    "Paused",
                    "Press ⏸ or Space to continue",
                    "Resume",
                ),
                GameMode::Over => {
                    if let Some(run) = self.world.last_run() {
                        show_overlay(
                            document,
                            "Game Over",
                            &format!(
                                "Distance: {} • Coins: {} • {}",
                                run.distance,
                                run.coins,
                                run.reason.describe()
                            ),
                            "Restart",
                        );
                    }
                }
            }
        }

        /// End-of-run work, safe to poll every frame: both halves guard
        /// themselves, so a record is written once and a run submitted once.
        fn poll_run_end(&mut self) {
            if self.world.best_distance > self.saved_best {
                self.saved_best = self.world.best_distance;
                BestDistance(self.saved_best).save();
            }

            if let Some(run) = self.world.take_pending_submission() {
                log::info!(
                    "Run over: distance {} coins {} ({})",
                    run.distance,
                    run.coins,
                    run.reason.describe()
                );
                api::submit_score(ScoreSubmission {
                    player_name: self.world.player_name.clone(),
                    score: run.distance,
                    coins: run.coins,
                });
            }
        }

        /// Read the name field into the session
        fn capture_player_name(&mut self, document: &Document) {
            if let Some(input) = document
                .get_element_by_id("playerName")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                self.world.set_player_name(&input.value());
            }
        }

        /// Primary action, capturing the typed name when leaving the menu
        fn primary(&mut self, document: &Document) {
            if self.world.mode == GameMode::Menu {
                self.capture_player_name(document);
            }
            self.world.primary_action();
        }

        /// R shortcut: restart on the spot, capturing the name on a menu start
        fn restart(&mut self, document: &Document) {
            if self.world.mode == GameMode::Menu {
                self.capture_player_name(document);
            }
            self.world.hard_restart();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skydrift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let best = BestDistance::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(canvas.clone(), ctx, best.0, seed)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_ui_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Skydrift running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space flaps (or resumes), R restarts, P toggles pause
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        // Space doubles as resume while paused
                        if g.world.mode == GameMode::Pause {
                            g.world.toggle_pause();
                        } else {
                            g.primary(&document);
                        }
                    }
                    "KeyR" => g.restart(&document),
                    "KeyP" => g.world.toggle_pause(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer on the canvas flaps, unless the board is open on top of it
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if board_is_open(&document) {
                    return;
                }
                game.borrow_mut().primary(&document);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_ui_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // The overlay button relabels itself: Start / Resume / Restart
        if let Some(btn) = document.get_element_by_id("btnStart") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut g = game.borrow_mut();
                if g.world.mode == GameMode::Pause {
                    g.world.toggle_pause();
                } else {
                    g.primary(&document);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnPause") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().world.toggle_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnBoard") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                open_leaderboard();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnClose") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                close_leaderboard(&document);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // A press on the modal backdrop (not its content) closes the board
        if let Some(modal) = document.get_element_by_id("modal") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|el| el.id() == "modal")
                    .unwrap_or(false);
                if on_backdrop {
                    let document = web_sys::window().unwrap().document().unwrap();
                    close_leaderboard(&document);
                }
            });
            let _ =
                modal.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }

    fn board_is_open(document: &Document) -> bool {
        document
            .get_element_by_id("modal")
            .map(|modal| !modal.class_list().contains("hidden"))
            .unwrap_or(false)
    }

    fn overlay_element(document: &Document) -> Option<HtmlElement> {
        document
            .get_element_by_id("overlay")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn show_overlay(document: &Document, title: &str, text: &str, button: &str) {
        if let Some(el) = document.get_element_by_id("ovTitle") {
            el.set_text_content(Some(title));
        }
        if let Some(el) = document.get_element_by_id("ovText") {
            el.set_text_content(Some(text));
        }
        if let Some(el) = document.get_element_by_id("btnStart") {
            el.set_text_content(Some(button));
        }
        if let Some(el) = overlay_element(document) {
            let _ = el.style().set_property("display", "grid");
        }
    }

    fn hide_overlay(document: &Document) {
        if let Some(el) = overlay_element(document) {
            let _ = el.style().set_property("display", "none");
        }
    }

    /// Open the board and kick off the fetch. A response landing after the
    /// board was closed again is dropped on the floor.
    fn open_leaderboard() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(modal) = document.get_element_by_id("modal") {
            let _ = modal.class_list().remove_1("hidden");
        }
        set_board_message(&document, "Loading…");

        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_leaderboard(DEFAULT_LEADERBOARD_LIMIT).await;
            if !board_is_open(&document) {
                return;
            }
            match result {
                Ok(rows) if rows.is_empty() => set_board_message(&document, "No scores yet."),
                Ok(rows) => render_board(&document, &rows),
                Err(err) => {
                    log::warn!("Leaderboard fetch failed: {err:?}");
                    set_board_message(&document, "Could not load leaderboard.");
                }
            }
        });
    }

    fn close_leaderboard(document: &Document) {
        if let Some(modal) = document.get_element_by_id("modal") {
            let _ = modal.class_list().add_1("hidden");
        }
    }

    /// Replace the board contents with a single status line
    fn set_board_message(document: &Document, message: &str) {
        let Some(board) = document.get_element_by_id("board") else {
            return;
        };
        board.set_inner_html("");
        if let Ok(note) = document.create_element("div") {
            note.set_class_name("muted");
            note.set_text_content(Some(message));
            let _ = board.append_child(&note);
        }
    }

    /// Rebuild the board from fetched rows. Names go in as text content, so
    /// a player called `<script>` stays a player called `<script>`.
    fn render_board(document: &Document, rows: &[api::LeaderboardRow]) {
        let Some(board) = document.get_element_by_id("board") else {
            return;
        };
        board.set_inner_html("");
        for (i, row) in rows.iter().enumerate() {
            let Ok(line) = document.create_element("div") else {
                continue;
            };
            line.set_class_name("boardRow");
            if let Ok(name) = document.create_element("div") {
                name.set_text_content(Some(&format!("#{} {}", i + 1, row.display_name())));
                let _ = line.append_child(&name);
            }
            if let Ok(score) = document.create_element("div") {
                score.set_text_content(Some(&row.score.to_string()));
                let _ = line.append_child(&score);
            }
            let _ = board.append_child(&line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skydrift (native) starting...");
    log::info!("Native builds run the simulation headless - serve the wasm build to play");

    println!("\nRunning headless demo flight...");
    demo_flight();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_flight() {
    use skydrift::sim::{GameMode, World, update};

    let mut world = World::new(800.0, 600.0, 0, 0xC0FFEE);
    world.set_player_name("demo");
    world.primary_action();

    // Naive autopilot: flap whenever falling through the midline. Enemies
    // are not dodged, so every demo ends eventually.
    let dt = 1.0 / 60.0;
    let mut ticks = 0u32;
    while world.mode == GameMode::Play && ticks < 60 * 120 {
        if world.ball.vy > 0.0 && world.ball.pos.y > world.height * 0.5 {
            world.primary_action();
        }
        update(&mut world, dt);
        ticks += 1;
    }

    match world.last_run() {
        Some(run) => println!(
            "✓ Demo over after {:.1}s: distance {} coins {} ({})",
            f64::from(ticks) * f64::from(dt),
            run.distance,
            run.coins,
            run.reason.describe()
        ),
        None => println!(
            "✓ Demo still flying after {} ticks: distance {}",
            ticks,
            world.distance as u32
        ),
    }
}
