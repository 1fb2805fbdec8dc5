//! WebGPU rendering module
//!
//! The scene is flat-colored triangles in court space; a single uniform
//! matrix maps them to clip space.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Primitive, primitives};
pub use vertex::{Vertex, colors};
