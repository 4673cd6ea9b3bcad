//! Mesh generation and the instanced forward renderer.

/// Bind groups shared by every draw call.
pub mod draw_context;
/// Procedural sphere and ring meshes.
pub mod geometry;
pub(crate) mod mesh_pass;
pub(crate) mod pipeline_util;
/// Per-frame instance upload and the scene render pass.
pub mod scene_renderer;

pub use mesh_pass::InstanceRaw;
pub use scene_renderer::SceneRenderer;
