//! Arc Pong entry point
//!
//! On the web this wires the canvas to the game loop. Natively it runs a
//! headless autopilot session and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use arc_pong::renderer::RenderState;
    use arc_pong::{Game, InputEvent, Settings};

    /// Browser-side state around the game
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl App {
        /// Canvas size in CSS pixels, the space mouse offsets are reported in
        fn window_size(&self) -> (u32, u32) {
            (
                self.canvas.client_width().max(1) as u32,
                self.canvas.client_height().max(1) as u32,
            )
        }

        /// Match the backing store to the CSS size times the device pixel ratio
        fn sync_drawable_size(&mut self) -> (u32, u32) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let (w, h) = self.window_size();
            let width = (w as f64 * dpr) as u32;
            let height = (h as f64 * dpr) as u32;
            if (self.canvas.width(), self.canvas.height()) != (width, height) {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                if let Some(ref mut render_state) = self.render_state {
                    render_state.resize(width, height);
                }
                log::info!("Canvas resized to {}x{}", width, height);
            }
            (width, height)
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.game.update(dt);

            let drawable = self.sync_drawable_size();
            let frame = self.game.draw(drawable);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame.vertices(), &frame.transform) {
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
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arc Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::default();
        let app = Rc::new(RefCell::new(App {
            game: Game::new(settings.clone()),
            render_state: None,
            canvas: canvas.clone(),
            last_time: 0.0,
        }));
        let (width, height) = app.borrow_mut().sync_drawable_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, &settings).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Arc Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut app = app.borrow_mut();
            let window_size = app.window_size();
            let pointer = InputEvent::PointerMotion {
                x: event.offset_x() as f32,
                y: event.offset_y() as f32,
            };
            app.game.handle_event(pointer, window_size);
        });
        let _ =
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use arc_pong::autopilot::Autopilot;
    use arc_pong::sim::GameEvent;
    use arc_pong::{Game, InputEvent, Settings};

    const WINDOW_SIZE: (u32, u32) = (1280, 720);

    /// Totals for one headless session
    #[derive(Debug, Default, Serialize)]
    pub struct DemoSummary {
        pub frames: u32,
        pub seconds: f32,
        pub paddle_hits: usize,
        pub wall_hits: usize,
        pub balls_lost: usize,
        pub ball_collisions: usize,
        pub resets: usize,
        pub max_active_balls: usize,
        pub max_triangles: usize,
        pub final_health: u32,
        pub final_collisions: u32,
    }

    /// Drive a session through the same pointer path the browser uses:
    /// court target, forward transform to a pixel, then `handle_event`.
    pub fn run(settings: &Settings) -> DemoSummary {
        let mut game = Game::new(settings.clone());
        let mut pilot = Autopilot::from_settings(settings);
        let mut summary = DemoSummary::default();

        let mut frame = game.draw(WINDOW_SIZE);
        let (frames, dt) = (game.settings().demo_frames, game.settings().demo_frame_dt);
        for _ in 0..frames {
            let target = pilot.target(game.state());
            let px = frame.transform.court_to_pixel(target);
            game.handle_event(InputEvent::PointerMotion { x: px.x, y: px.y }, WINDOW_SIZE);

            let report = game.update(dt);
            for event in &report.events {
                match event {
                    GameEvent::PaddleHit { .. } => summary.paddle_hits += 1,
                    GameEvent::WallHit { .. } => summary.wall_hits += 1,
                    GameEvent::BallLost { slot } => {
                        summary.balls_lost += 1;
                        log::info!("Ball {} reached the center", slot);
                    }
                    GameEvent::BallsCollided { .. } => summary.ball_collisions += 1,
                    GameEvent::Reset => summary.resets += 1,
                    GameEvent::BallSpawned { slot } => log::info!("Ball {} spawned", slot),
                }
            }

            frame = game.draw(WINDOW_SIZE);
            summary.frames += 1;
            summary.seconds += dt;
            summary.max_active_balls = summary.max_active_balls.max(game.state().active_count());
            summary.max_triangles = summary.max_triangles.max(frame.triangle_count());
        }

        summary.final_health = game.state().health;
        summary.final_collisions = game.state().num_collisions;
        summary
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use arc_pong::Settings;

    env_logger::init();
    log::info!("Arc Pong (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let summary = headless::run(&settings);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode summary: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
