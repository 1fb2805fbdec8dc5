//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Fixed ball slots with explicit active/inactive state
//! - Pure collision routines over ball values
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod state;
pub mod tick;

pub use arc::{Aabb, PaddleArc};
pub use collision::{
    ContactAxis, WallContacts, arc_vs_ball, ball_vs_ball, reaches_center, wall_vs_ball,
};
pub use state::{Ball, BallSlot, GameEvent, GamePhase, GameState, Wall};
pub use tick::{TickReport, tick};
