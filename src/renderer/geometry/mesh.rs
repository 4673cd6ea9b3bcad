//! Indexed triangle mesh data shared by all generators.

use crate::scene::Shape;

/// Per-vertex attributes uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching `@location(0..=1)` in the mesh shaders.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side indexed triangle list (counter-clockwise front faces).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex attributes.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Generate the mesh for a scene shape.
    #[must_use]
    pub fn from_shape(shape: Shape) -> Self {
        match shape {
            Shape::Sphere { radius, segments } => {
                super::sphere::uv_sphere(radius, segments, segments)
            }
            Shape::Ring {
                inner,
                outer,
                segments,
            } => super::ring::ring(inner, outer, segments, 1),
        }
    }

    /// Number of indices, as drawn.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
