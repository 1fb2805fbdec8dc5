//! Per-frame primitive list
//!
//! Draw order is back to front: paddle shadow, center square, paddle, balls,
//! health pips, wall shadows, walls. Everything except the walls disappears
//! while a reset is pending.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GamePhase, GameState, PaddleArc};

/// A drawable in court space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Rect {
        center: Vec2,
        radius: Vec2,
        color: [u8; 4],
    },
    Arc {
        paddle: PaddleArc,
        offset: Vec2,
        color: [u8; 4],
    },
}

impl Primitive {
    pub fn triangle_count(&self) -> usize {
        match self {
            Primitive::Rect { .. } => 2,
            Primitive::Arc { .. } => 8,
        }
    }

    pub fn vertices(self) -> Box<dyn Iterator<Item = Vertex>> {
        match self {
            Primitive::Rect {
                center,
                radius,
                color,
            } => Box::new(shapes::rectangle(center, radius, color)),
            Primitive::Arc {
                paddle,
                offset,
                color,
            } => Box::new(shapes::arc(paddle, offset, color)),
        }
    }
}

fn shadow() -> Vec2 {
    Vec2::new(0.0, -SHADOW_OFFSET)
}

/// Center and half-extents of the four walls: left, right, bottom, top
fn walls() -> [(Vec2, Vec2); 4] {
    let side = Vec2::new(WALL_RADIUS, COURT_RADIUS.y + 2.0 * WALL_RADIUS);
    let cap = Vec2::new(COURT_RADIUS.x, WALL_RADIUS);
    [
        (Vec2::new(-COURT_RADIUS.x - WALL_RADIUS, 0.0), side),
        (Vec2::new(COURT_RADIUS.x + WALL_RADIUS, 0.0), side),
        (Vec2::new(0.0, -COURT_RADIUS.y - WALL_RADIUS), cap),
        (Vec2::new(0.0, COURT_RADIUS.y + WALL_RADIUS), cap),
    ]
}

/// Center of the `i`th health pip above the top wall
pub fn health_pip_center(i: u32) -> Vec2 {
    Vec2::new(
        -COURT_RADIUS.x + (2.0 + 3.0 * i as f32) * HEALTH_PIP_RADIUS.x,
        COURT_RADIUS.y + 2.0 * WALL_RADIUS + 2.0 * HEALTH_PIP_RADIUS.y,
    )
}

/// Everything to draw this frame, in order
pub fn primitives(state: &GameState) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(16 + MAX_BALLS);
    let fg = colors::FOREGROUND;

    if state.phase() == GamePhase::Playing {
        let paddle = PaddleArc::facing(state.arc_paddle);
        out.push(Primitive::Arc {
            paddle,
            offset: shadow(),
            color: colors::SHADOW,
        });
        out.push(Primitive::Rect {
            center: Vec2::ZERO,
            radius: BALL_RADIUS,
            color: fg,
        });
        out.push(Primitive::Arc {
            paddle,
            offset: Vec2::ZERO,
            color: fg,
        });
        out.extend(state.active_balls().map(|(_, ball)| Primitive::Rect {
            center: ball.pos,
            radius: BALL_RADIUS,
            color: fg,
        }));
        out.extend((0..state.health).map(|i| Primitive::Rect {
            center: health_pip_center(i),
            radius: HEALTH_PIP_RADIUS,
            color: fg,
        }));
    }

    out.extend(walls().into_iter().map(|(center, radius)| Primitive::Rect {
        center: center + shadow(),
        radius,
        color: colors::SHADOW,
    }));
    out.extend(walls().into_iter().map(|(center, radius)| Primitive::Rect {
        center,
        radius,
        color: fg,
    }));

    out
}
