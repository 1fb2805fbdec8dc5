//! Shape generation for 2D primitives
//!
//! Shapes are produced lazily as triangle-list vertices in court space.

use glam::Vec2;

use super::vertex::Vertex;
use crate::consts::{PADDLE_INNER_RADIUS, PADDLE_OUTER_RADIUS};
use crate::polar_to_cartesian;
use crate::sim::PaddleArc;

/// Axis-aligned rectangle as two CCW triangles
pub fn rectangle(center: Vec2, radius: Vec2, color: [u8; 4]) -> impl Iterator<Item = Vertex> {
    let min = center - radius;
    let max = center + radius;
    [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ]
    .into_iter()
    .map(move |p| Vertex::at(p, color))
}

/// Paddle band as two triangles per angular segment, shifted by `offset`
pub fn arc(paddle: PaddleArc, offset: Vec2, color: [u8; 4]) -> impl Iterator<Item = Vertex> {
    paddle.segment_angles().flat_map(move |(a1, a2)| {
        let inner1 = polar_to_cartesian(PADDLE_INNER_RADIUS, a1) + offset;
        let inner2 = polar_to_cartesian(PADDLE_INNER_RADIUS, a2) + offset;
        let outer1 = polar_to_cartesian(PADDLE_OUTER_RADIUS, a1) + offset;
        let outer2 = polar_to_cartesian(PADDLE_OUTER_RADIUS, a2) + offset;

        [inner1, inner2, outer1, inner2, outer1, outer2]
            .into_iter()
            .map(move |p| Vertex::at(p, color))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_corners() {
        let verts: Vec<_> = rectangle(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.25), [255; 4]).collect();
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].position, [0.5, 1.75, 0.0]);
        assert_eq!(verts[2].position, [1.5, 2.25, 0.0]);
        assert_eq!(verts[5].position, [0.5, 2.25, 0.0]);
        assert!(verts.iter().all(|v| v.tex_coord == [0.5, 0.5]));
    }

    #[test]
    fn test_arc_spans_band() {
        let verts: Vec<_> = arc(PaddleArc::new(0.0), Vec2::ZERO, [255; 4]).collect();
        assert_eq!(verts.len(), 24);
        for v in &verts {
            let r = Vec2::new(v.position[0], v.position[1]).length();
            assert!((0.999..=1.351).contains(&r), "radius {r}");
        }
        // First vertex sits at the start angle on the inner edge
        let first = Vec2::new(verts[0].position[0], verts[0].position[1]);
        assert!((first - polar_to_cartesian(1.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_arc_offset() {
        let offset = Vec2::new(0.0, -0.07);
        let plain: Vec<_> = arc(PaddleArc::new(1.0), Vec2::ZERO, [0; 4]).collect();
        let shifted: Vec<_> = arc(PaddleArc::new(1.0), offset, [0; 4]).collect();
        for (a, b) in plain.iter().zip(&shifted) {
            assert!((b.position[1] - a.position[1] + 0.07).abs() < 1e-6);
            assert_eq!(a.position[0], b.position[0]);
        }
    }
}
