//! Recoil entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use recoil::renderer::CanvasRenderer;
    use recoil::sim::{GameEvent, GameState, TickInput, tick};

    /// Fallback frame delta for the very first frame (ms)
    const FIRST_FRAME_DT: f32 = 16.0;
    /// Cap on per-frame delta so a background tab doesn't teleport everything (ms)
    const MAX_FRAME_DT: f32 = 100.0;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64) -> Self {
            Self {
                state: GameState::new(width, height, seed),
                renderer: None,
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Run one frame of simulation
        fn update(&mut self, dt: f32) {
            let input = self.input;
            tick(&mut self.state, &input, dt.min(MAX_FRAME_DT));

            // Clear one-shot inputs after processing
            self.input.fire = None;
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut renderer) = self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Restart the session with a fresh seed
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed);
            self.input = TickInput::default();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Recoil starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(width, height, seed)));
        game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx, seed ^ 0x5eed));

        log::info!("Game initialized with seed: {seed} ({width}x{height})");

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Recoil running!");
    }

    /// Mouse position relative to the canvas
    fn mouse_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    /// First touch position relative to the canvas, if any touch is active
    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - begin drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = mouse_pos(&canvas_clone, &event);
                game.borrow_mut().state.begin_drag(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - track drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = mouse_pos(&canvas_clone, &event);
                game.borrow_mut().state.move_drag(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - release drag, maybe fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(fire) = g.state.end_drag() {
                    g.input.fire = Some(fire);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - begin drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    let mut g = game.borrow_mut();
                    g.state.begin_drag(pos);
                    // Touch gestures have a point immediately; a tap-and-release
                    // with no move still measures as a zero-length drag
                    g.state.move_drag(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - track drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().state.move_drag(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - release drag, maybe fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(fire) = g.state.end_drag() {
                    g.input.fire = Some(fire);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                FIRST_FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            update_hud(&g.state);
        }

        request_animation_frame(game);
    }

    /// DOM side-effects after a tick: score text and the game-over message
    fn update_hud(state: &GameState) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let score_changed = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDestroyed { .. }));
        if score_changed {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
        }

        if state.events.contains(&GameEvent::ShipDestroyed) {
            if let Some(el) = document.get_element_by_id("game-message") {
                let _ = el.set_attribute("class", "visible");
            }
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);

                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("game-message") {
                    let _ = el.set_attribute("class", "hidden");
                }
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some("0"));
                }

                log::info!("Game restarted with seed: {seed}");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
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
    log::info!("Recoil (native) starting...");
    log::info!("The game targets the browser - build with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
