//! Collision detection and response for square balls
//!
//! Every routine here takes ball values and returns the resolved values, so
//! each rule can be exercised on its own without a full game state.

use glam::Vec2;

use super::arc::PaddleArc;
use super::state::{Ball, Wall};
use crate::consts::*;
use crate::mix;

/// Resolve a ball against the arc paddle aimed at `paddle`.
///
/// Returns the deflected ball, or `None` when there is no contact.
pub fn arc_vs_ball(paddle: Vec2, ball: Ball) -> Option<Ball> {
    let corners = ball.corners();

    // Broad phase: some corner must sit inside the paddle's radial band
    if !corners.iter().any(|c| PaddleArc::in_band(*c)) {
        return None;
    }

    let bbox = PaddleArc::facing(paddle).collision_box();
    if !corners.iter().any(|c| bbox.contains(*c)) {
        return None;
    }

    let mut out = ball;

    // Push out and point away from center on each axis with a non-zero coordinate
    if out.pos.x > 0.0 {
        out.pos.x += BALL_RADIUS.x;
        out.vel.x = out.vel.x.abs();
    } else if out.pos.x < 0.0 {
        out.pos.x -= BALL_RADIUS.x;
        out.vel.x = -out.vel.x.abs();
    }
    if out.pos.y > 0.0 {
        out.pos.y += BALL_RADIUS.y;
        out.vel.y = out.vel.y.abs();
    } else if out.pos.y < 0.0 {
        out.pos.y -= BALL_RADIUS.y;
        out.vel.y = -out.vel.y.abs();
    }

    // Spin: pull y velocity toward the ball's offset from the paddle target
    let spin = (out.pos.y - paddle.y) / (PADDLE_OUTER_RADIUS + BALL_RADIUS.y);
    out.vel.y = mix(out.vel.y, spin, PADDLE_SPIN_BLEND).clamp(-1.0, 1.0);

    Some(out)
}

/// Walls a ball touched this step. At most one per side of each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl WallContacts {
    pub fn count(&self) -> u32 {
        [self.top, self.bottom, self.left, self.right]
            .into_iter()
            .filter(|hit| *hit)
            .count() as u32
    }

    pub fn walls(&self) -> impl Iterator<Item = Wall> {
        [
            (self.top, Wall::Top),
            (self.bottom, Wall::Bottom),
            (self.right, Wall::Right),
            (self.left, Wall::Left),
        ]
        .into_iter()
        .filter_map(|(hit, wall)| hit.then_some(wall))
    }
}

/// Clamp a ball inside the court and reflect it off every wall it crossed.
pub fn wall_vs_ball(ball: Ball) -> (Ball, WallContacts) {
    let limit = COURT_RADIUS - BALL_RADIUS;
    let mut out = ball;
    let mut contacts = WallContacts::default();

    if out.pos.y > limit.y {
        out.pos.y = limit.y;
        if out.vel.y > 0.0 {
            out.vel.y = -out.vel.y;
        }
        contacts.top = true;
    }
    if out.pos.y < -limit.y {
        out.pos.y = -limit.y;
        if out.vel.y < 0.0 {
            out.vel.y = -out.vel.y;
        }
        contacts.bottom = true;
    }
    if out.pos.x > limit.x {
        out.pos.x = limit.x;
        if out.vel.x > 0.0 {
            out.vel.x = -out.vel.x;
        }
        contacts.right = true;
    }
    if out.pos.x < -limit.x {
        out.pos.x = -limit.x;
        if out.vel.x < 0.0 {
            out.vel.x = -out.vel.x;
        }
        contacts.left = true;
    }

    (out, contacts)
}

/// Has the ball reached the protected center square?
#[inline]
pub fn reaches_center(ball: &Ball) -> bool {
    let reach = 2.0 * BALL_RADIUS;
    ball.pos.x.abs() <= reach.x && ball.pos.y.abs() <= reach.y
}

/// Axis the ball-ball response acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAxis {
    X,
    Y,
    Both,
}

/// Resolve two overlapping balls. Returns `None` when their boxes are apart.
///
/// Each ball is pushed a fixed `BALL_RADIUS` away from the other along the
/// dominant axis of separation, and both velocities flip on that axis.
pub fn ball_vs_ball(a: Ball, b: Ball) -> Option<(Ball, Ball, ContactAxis)> {
    let d = a.pos - b.pos;
    let reach = 2.0 * BALL_RADIUS;
    if d.x.abs() > reach.x || d.y.abs() > reach.y {
        return None;
    }

    let axis = if d.x.abs() > d.y.abs() {
        ContactAxis::X
    } else if d.x.abs() < d.y.abs() {
        ContactAxis::Y
    } else {
        ContactAxis::Both
    };

    let (mut a, mut b) = (a, b);
    if matches!(axis, ContactAxis::X | ContactAxis::Both) {
        let push = if a.pos.x > b.pos.x { BALL_RADIUS.x } else { -BALL_RADIUS.x };
        a.pos.x += push;
        b.pos.x -= push;
        a.vel.x = -a.vel.x;
        b.vel.x = -b.vel.x;
    }
    if matches!(axis, ContactAxis::Y | ContactAxis::Both) {
        let push = if a.pos.y > b.pos.y { BALL_RADIUS.y } else { -BALL_RADIUS.y };
        a.pos.y += push;
        b.pos.y -= push;
        a.vel.y = -a.vel.y;
        b.vel.y = -b.vel.y;
    }

    Some((a, b, axis))
}
