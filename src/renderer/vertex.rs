//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Packed vertex: court-space position, 8-bit RGBA color, texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
    pub tex_coord: [f32; 2],
}

/// Texture coordinate that samples the middle of the 1x1 white texture
pub const FLAT_TEX_COORD: [f32; 2] = [0.5, 0.5];

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [u8; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
            tex_coord: FLAT_TEX_COORD,
        }
    }

    #[inline]
    pub fn at(p: Vec2, color: [u8; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Unorm8x4, 2 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// `0xRRGGBBAA` to bytes
    pub const fn hex(rgba: u32) -> [u8; 4] {
        rgba.to_be_bytes()
    }

    pub const BACKGROUND: [u8; 4] = hex(0x171714ff);
    pub const FOREGROUND: [u8; 4] = hex(0xd1bb54ff);
    pub const SHADOW: [u8; 4] = hex(0x604d29ff);
}
