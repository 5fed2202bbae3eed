//! Pipe Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build plays in a canvas; the native build runs a headless autopilot
//! session and checks that its replay reproduces it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use pipe_flap::Settings;
    use pipe_flap::audio::{AudioManager, SoundEffect};
    use pipe_flap::consts::*;
    use pipe_flap::platform::{FrameDriver, InputGate};
    use pipe_flap::renderer::{CanvasRenderer, build_scene};
    use pipe_flap::sim::{GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        driver: FrameDriver,
        input: InputGate,
        autopilot: bool,
    }

    impl Game {
        /// Run however many simulation steps this display frame owes
        fn update(&mut self, time: f64) {
            let steps = self.driver.advance(time);
            for _ in 0..steps {
                let input = TickInput {
                    activate: self.input.take(),
                    now_ms: time,
                    autopilot: self.autopilot,
                };
                tick(&mut self.state, &input);

                for event in &self.state.events {
                    if let Some(effect) = SoundEffect::for_event(event) {
                        self.audio.play(effect);
                    }
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&build_scene(&self.state, &self.settings));
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pipe Flap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            renderer: CanvasRenderer::new(ctx)?,
            audio: AudioManager::new(&settings),
            settings,
            driver: FrameDriver::new(),
            input: InputGate::new(),
            autopilot: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pipe Flap running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Space flaps (auto-repeat filtered), A toggles the autopilot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.input.key_down(event.repeat());
                    }
                    "KeyA" if !event.repeat() => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    "KeyM" if !event.repeat() => {
                        g.settings.muted = !g.settings.muted;
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                        settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    game.borrow_mut().input.key_up();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Stop the synthetic mousedown that would double the press
                event.prevent_default();
                game.borrow_mut().input.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tab hidden: rAF stops, so the next frame must not see the gap as backlog
        if let Some(document) = window.document() {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.driver.reset();
                    g.input.clear();
                    log::debug!("Tab hidden - frame driver reset");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: the keyup for a held Space never arrives
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
                log::debug!("Window blurred - input cleared");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
            g.update(now_ms());
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use pipe_flap::Tuning;
    use pipe_flap::consts::SIM_DT;
    use pipe_flap::sim::{GameEvent, GameState, Replay, TickInput};

    const MAX_TICKS: u32 = 20_000;

    env_logger::init();
    log::info!("Pipe Flap (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => 0x5EED,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(&path)?)?,
        None => Tuning::default(),
    };

    let mut state = GameState::with_tuning(seed, tuning)?;
    let mut replay = Replay::new(&state);
    let frame_ms = SIM_DT as f64 * 1000.0;

    for i in 0..MAX_TICKS {
        let input = TickInput {
            activate: false,
            now_ms: i as f64 * frame_ms,
            autopilot: true,
        };
        replay.record(&mut state, input);
        if state.events.iter().any(|e| matches!(e, GameEvent::Died { .. })) {
            break;
        }
    }

    log::info!(
        "Autopilot run: seed {} score {} after {} ticks ({:?})",
        seed,
        state.score,
        replay.inputs.len(),
        state.phase
    );

    let replayed = Replay::from_json(&replay.to_json()?)?.run()?;
    if replayed != state {
        return Err("replay diverged from the recorded run".into());
    }
    log::info!("Replay reproduced the run exactly");

    println!("seed={} score={} ticks={}", seed, state.score, replay.inputs.len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
