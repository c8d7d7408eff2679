//! WebGPU rendering module
//!
//! A pure read of the simulation state each frame: `shapes` turns a
//! `GameState` snapshot into a triangle list, `pipeline` uploads and draws it.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_frame;
pub use vertex::Vertex;
