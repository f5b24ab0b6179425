//! Chaos Jumper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use chaos_jumper::audio::AudioManager;
    use chaos_jumper::renderer::{RenderState, build_scene, shake_offset};
    use chaos_jumper::sim::{GamePhase, GameSession, InputState, Outcome, tick};
    use chaos_jumper::{GameError, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        input: InputState,
        audio: AudioManager,
        settings: Settings,
        /// Presentation-only randomness (shake jitter)
        jitter_rng: Pcg32,
        /// Phase the UI panels were last drawn for
        shown_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(session: GameSession, settings: Settings) -> Self {
            let jitter_rng = Pcg32::seed_from_u64(session.seed ^ 0x5eed);
            Self {
                audio: AudioManager::new(&settings),
                session,
                render_state: None,
                input: InputState::default(),
                settings,
                jitter_rng,
                shown_phase: None,
            }
        }

        /// One simulation tick per frame, then dispatch effect cues
        fn update(&mut self) {
            tick(&mut self.session, &self.input);
            for event in self.session.drain_events() {
                self.audio.play(&event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let offset = shake_offset(
                self.session.shake,
                self.settings.effective_screen_shake(),
                &mut self.jitter_rng,
            );
            let vertices = build_scene(&self.session, offset, self.settings.particles);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Run a flow command, logging rejected ones
        fn command(&mut self, f: impl FnOnce(&mut GameSession) -> Result<(), GameError>) {
            self.audio.resume();
            if let Err(e) = f(&mut self.session) {
                log::warn!("{e}");
            }
            self.input = InputState::default();
        }

        /// Update HUD and panels in the DOM
        fn update_ui(&mut self, document: &Document) {
            let run = self.session.run;
            set_text(document, "level", &format!("Level: {}", run.level));
            set_text(document, "lives", &format!("Lives: {}", run.lives));
            set_text(document, "score", &format!("Score: {}", run.score));

            let phase = self.session.phase;
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            set_visible(document, "menu", phase == GamePhase::Menu);
            set_visible(document, "level-complete", phase == GamePhase::LevelComplete);
            set_visible(document, "hud", phase != GamePhase::Menu);
            set_visible(document, "controls", phase == GamePhase::Playing);

            if let GamePhase::GameOver(outcome) = phase {
                let heading = match outcome {
                    Outcome::Won => "You Win!",
                    Outcome::Lost => "Game Over",
                };
                if let Some(el) = document.query_selector("#game-over h2").ok().flatten() {
                    el.set_text_content(Some(heading));
                }
                set_visible(document, "game-over", true);
            } else {
                set_visible(document, "game-over", false);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chaos Jumper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let width = canvas.width();
        let height = canvas.height();

        let settings = Settings::load(&canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let session = match GameSession::new(seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to build levels: {e}");
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(session, settings)));

        // Rendering is optional; the simulation runs without it
        match init_renderer(&canvas, width, height).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::warn!("WebGPU unavailable - rendering disabled"),
        }

        setup_hold_buttons(&document, game.clone());
        setup_keyboard(game.clone());
        setup_flow_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Chaos Jumper running!");
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::warn!("Failed to create surface: {e}"))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("Failed to get adapter: {e}"))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| log::warn!("Renderer setup failed: {e}"))
            .ok()
    }

    /// Touch and mouse hold buttons set input flags while pressed
    fn setup_hold_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let bindings: [(&str, fn(&mut InputState, bool)); 3] = [
            ("left-btn", |i, v| i.left = v),
            ("right-btn", |i, v| i.right = v),
            ("jump-btn", |i, v| i.jump = v),
        ];

        for (id, set) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing control #{id}");
                continue;
            };

            for (event, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("touchcancel", false),
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    set(&mut game.borrow_mut().input, pressed);
                });
                let _ = btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Arrow keys / WASD / space feed the same flags as the touch buttons
    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        for (event, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = pressed,
                    "ArrowRight" | "d" | "D" => g.input.right = pressed,
                    " " | "ArrowUp" | "w" | "W" => g.input.jump = pressed,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_flow_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, fn(&mut GameSession) -> Result<(), GameError>); 3] = [
            ("start-btn", GameSession::start),
            ("next-level-btn", GameSession::next_level),
            ("restart-btn", GameSession::restart),
        ];

        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{id}");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().command(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_ui(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chaos Jumper (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    if let Err(e) = demo_run(0xC4A05) {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless run: hop rightwards until the run ends or time runs out
#[cfg(not(target_arch = "wasm32"))]
fn demo_run(seed: u64) -> Result<(), chaos_jumper::GameError> {
    use chaos_jumper::sim::{EffectEvent, GamePhase, GameSession, InputState, tick};

    const MAX_TICKS: u64 = 20_000;

    let mut session = GameSession::new(seed)?;
    session.start()?;

    while session.time_ticks < MAX_TICKS {
        match session.phase {
            GamePhase::Playing => {
                let input = InputState {
                    right: true,
                    jump: session.time_ticks % 40 < 20,
                    ..Default::default()
                };
                tick(&mut session, &input);
                for event in session.drain_events() {
                    match event {
                        EffectEvent::Death { origin } => log::info!("Died near {origin}"),
                        EffectEvent::LevelComplete => {
                            log::info!("Cleared level {}", session.run.level)
                        }
                        _ => log::trace!("{:?}", event),
                    }
                }
            }
            GamePhase::LevelComplete => session.next_level()?,
            GamePhase::GameOver(outcome) => {
                log::info!("Run over: {:?}", outcome);
                break;
            }
            GamePhase::Menu => session.start()?,
        }
    }

    println!(
        "seed {seed}: level {}, lives {}, score {} after {} ticks",
        session.run.level, session.run.lives, session.run.score, session.time_ticks
    );
    Ok(())
}
