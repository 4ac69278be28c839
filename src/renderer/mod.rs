//! WebGPU rendering module
//!
//! Flat-colored quads tessellated from the scene graph each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
