//! Frame driver
//!
//! Ties input, simulation and drawing together. The viewport transform built
//! by `draw` is kept here and handed to the next pointer event, so input
//! always maps through the transform of the last frame actually drawn.

use glam::Vec2;

use crate::renderer::scene::{self, Primitive};
use crate::renderer::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GameState, TickReport, tick};
use crate::viewport::ViewportTransform;

/// Input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in window pixels (top-left origin)
    PointerMotion { x: f32, y: f32 },
    /// Anything else; ignored
    Other,
}

/// One frame's worth of drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub primitives: Vec<Primitive>,
    pub transform: ViewportTransform,
    pub clear_color: [u8; 4],
}

impl Frame {
    /// Triangle-list vertices, generated on demand
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.primitives.iter().copied().flat_map(Primitive::vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(Primitive::triangle_count).sum()
    }
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    settings: Settings,
    /// Transform from the most recent `draw`
    viewport: Option<ViewportTransform>,
    window_size: (u32, u32),
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(),
            settings,
            viewport: None,
            window_size: (1, 1),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> Option<ViewportTransform> {
        self.viewport
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Apply a host event. `window` is the window's current pixel size.
    pub fn handle_event(&mut self, event: InputEvent, window: (u32, u32)) {
        self.window_size = window;
        match event {
            InputEvent::PointerMotion { x, y } => {
                let target = self.pointer_to_court(x, y);
                self.state.aim_paddle(target);
            }
            InputEvent::Other => {}
        }
    }

    /// Court point under a window pixel. Before the first draw the window
    /// size stands in for the drawable size.
    pub fn pointer_to_court(&self, x: f32, y: f32) -> Vec2 {
        let window = self.window_size;
        let viewport = self
            .viewport
            .unwrap_or_else(|| ViewportTransform::new(window.0, window.1));
        viewport.window_pointer_to_court(x, y, window)
    }

    /// Advance the simulation, with elapsed time clamped to `[0, max_frame_dt]`
    pub fn update(&mut self, elapsed: f32) -> TickReport {
        let dt = if elapsed.is_finite() {
            elapsed.max(0.0).min(self.settings.max_frame_dt)
        } else {
            0.0
        };
        tick(&mut self.state, dt)
    }

    /// Build this frame's primitives and transform for a drawable of the given size
    pub fn draw(&mut self, drawable: (u32, u32)) -> Frame {
        let transform = ViewportTransform::new(drawable.0, drawable.1);
        self.viewport = Some(transform);
        Frame {
            primitives: scene::primitives(&self.state),
            transform,
            clear_color: colors::BACKGROUND,
        }
    }
}
