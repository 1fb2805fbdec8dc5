//! Court <-> clip space mapping
//!
//! The court is fitted into the drawable area without stretching: clip space
//! spans `[-1, 1]` on both axes, so x is divided by the aspect ratio. The
//! forward transform goes to the GPU as a uniform; the inverse maps pointer
//! positions back onto the court for paddle aiming.

use glam::{Affine2, Mat2, Mat4, Vec2, Vec3, Vec4};

use crate::consts::*;

/// Area of the court that must stay visible: walls, padding and the health strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl SceneBounds {
    pub fn court() -> Self {
        let margin = Vec2::splat(2.0 * WALL_RADIUS + PADDING);
        let min = -COURT_RADIUS - margin;
        let max = COURT_RADIUS + margin + Vec2::new(0.0, HEALTH_ROWS * HEALTH_PIP_RADIUS.y);
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        0.5 * (self.min + self.max)
    }
}

/// Per-frame mapping between court and clip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Drawable size in pixels the transform was built for
    pub size: (u32, u32),
    pub aspect: f32,
    /// Court units to clip units (before the aspect correction on x)
    pub scale: f32,
    pub center: Vec2,
}

impl ViewportTransform {
    /// Fit the scene into a drawable of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width.max(1), height.max(1));
        let aspect = size.0 as f32 / size.1 as f32;
        let scene = SceneBounds::court();
        let extent = scene.size();

        // x must fit in [-aspect, aspect], y in [-1, 1]
        let scale = (2.0 * aspect / extent.x).min(2.0 / extent.y);

        Self {
            size,
            aspect,
            scale,
            center: scene.center(),
        }
    }

    /// Per-axis scale from court to clip
    #[inline]
    fn axis_scale(&self) -> Vec2 {
        Vec2::new(self.scale / self.aspect, self.scale)
    }

    pub fn court_to_clip(&self, p: Vec2) -> Vec2 {
        (p - self.center) * self.axis_scale()
    }

    pub fn clip_to_court(&self, clip: Vec2) -> Vec2 {
        clip / self.axis_scale() + self.center
    }

    /// Court-to-clip as a column-major 4x4 for the shader uniform
    pub fn court_to_clip_matrix(&self) -> Mat4 {
        let s = self.axis_scale();
        Mat4::from_cols(
            Vec4::new(s.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(-self.center.x * s.x, -self.center.y * s.y, 0.0, 1.0),
        )
    }

    /// Clip-to-court as a 3x2 affine
    pub fn clip_to_court_affine(&self) -> Affine2 {
        let s = self.axis_scale();
        Affine2::from_mat2_translation(Mat2::from_diagonal(s.recip()), self.center)
    }

    /// Window pixel (top-left origin, +y down) to clip space (+y up).
    ///
    /// Samples the pixel center, hence the half-pixel offset.
    pub fn pixel_to_clip(&self, x: f32, y: f32) -> Vec2 {
        pixel_to_clip(x, y, self.size)
    }

    pub fn clip_to_pixel(&self, clip: Vec2) -> Vec2 {
        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        Vec2::new((clip.x + 1.0) * 0.5 * w - 0.5, (1.0 - clip.y) * 0.5 * h - 0.5)
    }

    /// Pointer position in window pixels to a court-space point
    pub fn pointer_to_court(&self, x: f32, y: f32) -> Vec2 {
        self.clip_to_court_affine()
            .transform_point2(self.pixel_to_clip(x, y))
    }

    /// Pointer position reported against a window of a different pixel size
    /// than the drawable (HiDPI), mapped through this frame's inverse.
    pub fn window_pointer_to_court(&self, x: f32, y: f32, window: (u32, u32)) -> Vec2 {
        self.clip_to_court_affine()
            .transform_point2(pixel_to_clip(x, y, window))
    }

    /// Court point to the window pixel that maps back onto it
    pub fn court_to_pixel(&self, p: Vec2) -> Vec2 {
        let clip = self.court_to_clip_matrix() * Vec3::new(p.x, p.y, 0.0).extend(1.0);
        self.clip_to_pixel(clip.truncate().truncate())
    }
}

/// Pixel in a `size` area to clip space, sampling the pixel center
pub fn pixel_to_clip(x: f32, y: f32, size: (u32, u32)) -> Vec2 {
    let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
    Vec2::new((x + 0.5) / w * 2.0 - 1.0, (y + 0.5) / h * -2.0 + 1.0)
}
