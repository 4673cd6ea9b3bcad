//! Procedural mesh generators for the scene's shapes.

/// Vertex format and indexed mesh container.
pub mod mesh;
/// Flat annulus generator.
pub mod ring;
/// Latitude/longitude sphere generator.
pub mod sphere;

pub use mesh::{MeshData, MeshVertex};
