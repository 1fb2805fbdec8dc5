//! Arc Pong - protect the center square with an orbiting arc paddle
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (ball slots, collisions, session state)
//! - `viewport`: Court <-> clip space transforms and pointer mapping
//! - `renderer`: Primitive emission and the WebGPU pipeline
//! - `game`: Frame driver tying input, simulation and drawing together
//! - `autopilot`: Scripted paddle steering for the headless demo

pub mod autopilot;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use game::{Frame, Game, InputEvent};
pub use settings::{Settings, SettingsError};
pub use viewport::ViewportTransform;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Court half-extents
    pub const COURT_RADIUS: Vec2 = Vec2::new(7.0, 5.0);
    /// Ball half-extents (balls are squares)
    pub const BALL_RADIUS: Vec2 = Vec2::new(0.2, 0.2);

    /// Number of ball slots
    pub const MAX_BALLS: usize = 7;
    /// Wall collisions between ball spawns
    pub const SPAWN_INTERVAL: u32 = 12;
    /// Last collision count that still spawns a ball
    pub const LAST_SPAWN_COLLISIONS: u32 = SPAWN_INTERVAL * (MAX_BALLS as u32 - 1);

    pub const START_HEALTH: u32 = 5;
    /// One short of the first spawn, so the second ball enters after the first wall hit
    pub const START_COLLISIONS: u32 = SPAWN_INTERVAL - 1;

    /// Speed multiplier is `collisions / 12 + BASE`, capped at MAX
    pub const BASE_SPEED_MULTIPLIER: f32 = 2.0;
    pub const MAX_SPEED_MULTIPLIER: f32 = 7.5;

    /// Paddle band
    pub const PADDLE_INNER_RADIUS: f32 = 1.0;
    pub const PADDLE_OUTER_RADIUS: f32 = 1.35;
    /// Half of the drawn angular span (radians)
    pub const PADDLE_HALF_SPAN: f32 = 0.5;
    /// Angular step between drawn arc segments
    pub const PADDLE_SEGMENT_STEP: f32 = 0.25;
    /// How far the deflected y velocity moves toward the spin target
    pub const PADDLE_SPIN_BLEND: f32 = 0.75;

    /// Drawing constants (court units)
    pub const WALL_RADIUS: f32 = 0.05;
    pub const SHADOW_OFFSET: f32 = 0.07;
    pub const PADDING: f32 = 0.14;
    pub const HEALTH_PIP_RADIUS: Vec2 = Vec2::new(0.1, 0.1);
    /// Rows reserved above the court for the health pips
    pub const HEALTH_ROWS: f32 = 3.0;
}

/// Angle of a court-space point around the origin.
///
/// Uses `atan2`, so points on the y axis resolve to ±π/2 and the origin
/// itself maps to 0.
#[inline]
pub fn paddle_angle(point: Vec2) -> f32 {
    if point == Vec2::ZERO {
        0.0
    } else {
        point.y.atan2(point.x)
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Linear blend from `a` to `b`
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
