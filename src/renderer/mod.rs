//! WebGPU rendering module
//!
//! Scenes are tessellated on the CPU into colored triangles and drawn with a
//! single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
