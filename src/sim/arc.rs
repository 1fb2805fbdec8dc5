//! Arc paddle geometry
//!
//! The paddle is a band between an inner and outer radius around the court
//! origin, centered on the angle of the player's target point. Collision uses
//! a coarse box over three outer-edge samples rather than the true band.

use glam::Vec2;

use crate::consts::*;
use crate::{paddle_angle, polar_to_cartesian};

/// Axis-aligned box, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Smallest box containing all points
    pub fn around(points: &[Vec2]) -> Self {
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The paddle arc at a given angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleArc {
    /// Center angle (radians)
    pub theta: f32,
}

impl PaddleArc {
    pub fn new(theta: f32) -> Self {
        Self { theta }
    }

    /// Arc pointing at a court-space target
    pub fn facing(target: Vec2) -> Self {
        Self::new(paddle_angle(target))
    }

    /// Is a point within the band's radial range?
    #[inline]
    pub fn in_band(point: Vec2) -> bool {
        let r = point.length();
        (PADDLE_INNER_RADIUS..=PADDLE_OUTER_RADIUS).contains(&r)
    }

    /// Outer-edge points used for collision: left edge, center, and a point
    /// a quarter radian past center.
    pub fn collision_samples(&self) -> [Vec2; 3] {
        [
            polar_to_cartesian(PADDLE_OUTER_RADIUS, self.theta - PADDLE_HALF_SPAN),
            polar_to_cartesian(PADDLE_OUTER_RADIUS, self.theta),
            polar_to_cartesian(PADDLE_OUTER_RADIUS, self.theta + PADDLE_SEGMENT_STEP),
        ]
    }

    pub fn collision_box(&self) -> Aabb {
        Aabb::around(&self.collision_samples())
    }

    /// Segment boundary angles for drawing, from `theta - 0.5` to `theta + 0.5`
    pub fn segment_angles(self) -> impl Iterator<Item = (f32, f32)> {
        (-2..2).map(move |i| {
            let a = self.theta + PADDLE_SEGMENT_STEP * i as f32;
            (a, a + PADDLE_SEGMENT_STEP)
        })
    }
}
