//! Water surface: plane mesh, noise and the wave/shading evaluator.

mod mesh;
pub mod noise;
pub mod waves;

// Re-export public types
pub use mesh::{Vertex, WaterMesh, MAX_SUBDIVISIONS};
