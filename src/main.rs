//! Dash Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dash_runner::audio::{self, MusicTrack, SilentTrack, WebAudioTrack};
    use dash_runner::consts::MAX_LEVEL;
    use dash_runner::platform::{command_for_key, command_for_pointer};
    use dash_runner::renderer::{RenderState, build_scene};
    use dash_runner::sim::{Command, FrameInput, GameEvent, GamePhase, GameState, Settlement, tick};
    use dash_runner::{Progress, Settings};

    /// DOM overlay shown for each phase
    const SCREENS: [(&str, GamePhase); 5] = [
        ("start-screen", GamePhase::Start),
        ("level-select", GamePhase::LevelSelect),
        ("game-over", GamePhase::GameOver),
        ("win-screen", GamePhase::Win),
        ("customize-screen", GamePhase::Customize),
    ];

    /// Menu buttons and the command each one sends
    const BUTTONS: [(&str, Command); 8] = [
        ("play-btn", Command::OpenLevelSelect),
        ("customize-btn", Command::OpenCustomize),
        ("back-btn", Command::Back),
        ("customize-back-btn", Command::Back),
        ("restart-btn", Command::Restart),
        ("continue-btn", Command::Continue),
        ("menu-btn", Command::OpenLevelSelect),
        ("win-menu-btn", Command::OpenLevelSelect),
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        input: FrameInput,
        music: Box<dyn MusicTrack>,
        document: Document,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Run one simulation step and hand its events to the collaborators
        fn update(&mut self, now: f64) {
            tick(&mut self.state, &self.input, now);
            // Clear one-shot inputs after processing
            self.input.clear();

            for event in self.state.drain_events() {
                audio::dispatch(self.music.as_mut(), &event);
                match event {
                    GameEvent::PhaseChanged { to, .. } => self.show_screen(to),
                    GameEvent::Hud {
                        score,
                        level,
                        coins,
                    } => self.update_hud(score, level, coins),
                    GameEvent::Commit(settlement) => {
                        self.state.progress.save();
                        self.show_settlement(&settlement);
                    }
                    GameEvent::Unlocked { .. } => self.refresh_level_buttons(),
                    GameEvent::MusicStart | GameEvent::MusicStop => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.sync_canvas_size();
            let vertices = build_scene(&self.state, &self.settings);
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

        /// Match the drawing buffer to the canvas' CSS size
        fn sync_canvas_size(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if let Some(ref mut render_state) = self.render_state {
                if (width, height) != render_state.size && width > 0 && height > 0 {
                    self.canvas.set_width(width);
                    self.canvas.set_height(height);
                    render_state.resize(width, height);
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn update_hud(&self, score: u32, level: u8, coins: u32) {
            self.set_text("hud-score", &score.to_string());
            self.set_text("hud-level", &level.to_string());
            self.set_text("hud-coins", &coins.to_string());
        }

        /// Show the overlay for `phase` and hide the rest
        fn show_screen(&self, phase: GamePhase) {
            for (id, screen_phase) in SCREENS {
                if let Some(el) = self.document.get_element_by_id(id) {
                    set_hidden(&el, screen_phase != phase);
                }
            }
            if let Some(hud) = self.document.get_element_by_id("hud") {
                set_hidden(&hud, phase != GamePhase::Playing);
            }
            if phase == GamePhase::LevelSelect {
                self.refresh_level_buttons();
            }
        }

        fn show_settlement(&self, settlement: &Settlement) {
            self.set_text("final-score", &settlement.score.to_string());
            self.set_text("coins-earned", &settlement.coins_earned.to_string());
            self.set_text("high-score", &self.state.progress.high_score.to_string());
            if let Some(el) = self.document.get_element_by_id("new-high-score") {
                set_hidden(&el, !settlement.new_high_score);
            }
        }

        /// Lock every level button above the unlock ceiling
        fn refresh_level_buttons(&self) {
            let unlocked = self.state.progress.unlocked_levels;
            for level in 1..=MAX_LEVEL {
                let Some(btn) = self.document.get_element_by_id(&format!("level-{}", level)) else {
                    continue;
                };
                let classes = btn.class_list();
                let _ = if level > unlocked {
                    classes.add_1("locked")
                } else {
                    classes.remove_1("locked")
                };
            }
        }
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dash Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            set_hidden(&loading, true);
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let progress = Progress::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let music: Box<dyn MusicTrack> = if settings.effective_music_volume() > 0.0 {
            Box::new(WebAudioTrack::new(settings.effective_music_volume()))
        } else {
            Box::new(SilentTrack::default())
        };

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, progress),
            settings,
            render_state: None,
            input: FrameInput::default(),
            music,
            document: document.clone(),
            canvas: canvas.clone(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.show_screen(GamePhase::Start);
            let (level, coins) = (g.state.current_level, g.state.progress.coins);
            g.update_hud(0, level, coins);
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone());
        setup_auto_mute(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Dash Runner running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                if let Some(command) = command_for_key(&event.key(), event.repeat(), phase) {
                    event.prevent_default();
                    g.input.push(command);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse, touch and pen all arrive as pointer events
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                if let Some(command) = command_for_pointer(phase) {
                    g.input.push(command);
                }
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, command) in BUTTONS {
            let Some(btn) = document.get_element_by_id(id) else {
                log::debug!("No #{} button in page", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.push(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for level in 1..=MAX_LEVEL {
            let Some(btn) = document.get_element_by_id(&format!("level-{}", level)) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.push(Command::StartLevel(level));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Silence the music while the window is in the background
    fn setup_auto_mute(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur && g.music.is_playing() {
                    g.music.stop();
                    log::info!("Music muted (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing && !g.music.is_playing() {
                    g.music.start();
                }
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            // rAF timestamps are milliseconds
            g.update(time / 1000.0);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Dash Runner failed to start: {:?}", e);
    }
}

/// Frames the headless run may take before giving up
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAME_LIMIT: usize = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dash_runner::audio::{self, MusicTrack, SilentTrack};
    use dash_runner::sim::{Command, FrameInput, GameEvent, GamePhase, GameState, autopilot, tick};
    use dash_runner::Progress;

    env_logger::init();
    log::info!("Dash Runner (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let mut state = GameState::new(0x5eed, Progress::load());
    let mut music = SilentTrack::default();
    let mut input = FrameInput::default();

    input.push(Command::OpenLevelSelect);
    input.push(Command::StartLevel(1));

    // Autopilot at a fixed 60 fps clock
    let mut frames = 0;
    while frames < HEADLESS_FRAME_LIMIT {
        let now = frames as f64 / 60.0;
        if state.phase == GamePhase::Playing {
            if let Some(command) = autopilot(&state) {
                input.push(command);
            }
        }
        tick(&mut state, &input, now);
        input.clear();
        frames += 1;

        for event in state.drain_events() {
            audio::dispatch(&mut music, &event);
            if let GameEvent::Commit(settlement) = event {
                state.progress.save();
                log::info!(
                    "Run settled: level {} score {} (+{} coins, completed: {})",
                    settlement.level,
                    settlement.score,
                    settlement.coins_earned,
                    settlement.completed
                );
            }
        }

        if matches!(state.phase, GamePhase::Win | GamePhase::GameOver) {
            break;
        }
    }

    log::info!(
        "Headless run ended in phase {} after {} frames (music playing: {})",
        state.phase.as_str(),
        frames,
        music.is_playing()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
