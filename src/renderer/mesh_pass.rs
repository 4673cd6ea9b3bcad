//! Instanced indexed-mesh draw pass.
//!
//! `MeshPass` owns the vertex and index buffers of one generated mesh plus
//! a growable per-instance buffer, so every node sharing a [`MeshKind`]
//! (all 200 stars, say) is drawn with a single call.

use glam::Mat4;

use crate::error::OrreryError;
use crate::gpu::dynamic_buffer::DynamicBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{Shader, ShaderComposer};
use crate::renderer::geometry::{MeshData, MeshVertex};
use crate::renderer::pipeline_util;
use crate::scene::{Material, MeshKind};

/// Per-instance model matrix and material colors.
/// NOTE: Must match `InstanceInput` in `modules/mesh.wgsl` (96 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    /// Linear base color, alpha unused.
    pub color: [f32; 4],
    /// Linear emissive color, alpha unused.
    pub emissive: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
    ];

    /// Instance data for a node drawn at `world` with `material`.
    #[must_use]
    pub fn new(world: Mat4, material: &Material) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            color: material.color.to_rgba(1.0),
            emissive: material.emissive.to_rgba(1.0),
        }
    }

    /// Instance-rate buffer layout at `@location(2..=7)`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Create a standard instanced-mesh render pipeline.
pub(crate) fn create_mesh_pipeline(
    context: &RenderContext,
    label: &str,
    shader: Shader,
    cull_mode: Option<wgpu::Face>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    shader_composer: &mut ShaderComposer,
) -> Result<wgpu::RenderPipeline, OrreryError> {
    let module = shader_composer.compose(&context.device, shader)?;

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    Ok(context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout(), InstanceRaw::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_target(context.render_format),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState {
                count: context.sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        }))
}

/// One mesh plus the instances drawing it.
pub(crate) struct MeshPass {
    pub kind: MeshKind,
    vertex_buffer: DynamicBuffer,
    index_buffer: DynamicBuffer,
    index_count: u32,
    instance_buffer: DynamicBuffer,
    instance_count: u32,
}

impl MeshPass {
    /// Upload `mesh` for `kind`. Instances start empty.
    pub fn new(device: &wgpu::Device, kind: MeshKind, mesh: &MeshData) -> Self {
        let label = format!("{kind:?}");
        Self {
            kind,
            vertex_buffer: DynamicBuffer::new_with_data(
                device,
                &format!("{label} Vertices"),
                &mesh.vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: DynamicBuffer::new_with_data(
                device,
                &format!("{label} Indices"),
                &mesh.indices,
                wgpu::BufferUsages::INDEX,
            ),
            index_count: mesh.index_count(),
            instance_buffer: DynamicBuffer::new(
                device,
                &format!("{label} Instances"),
                size_of::<InstanceRaw>(),
                wgpu::BufferUsages::VERTEX,
            ),
            instance_count: 0,
        }
    }

    /// Replace the mesh geometry (after a layout change).
    pub fn write_mesh(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &MeshData,
    ) {
        let _ = self.vertex_buffer.write(device, queue, &mesh.vertices);
        let _ = self.index_buffer.write(device, queue, &mesh.indices);
        self.index_count = mesh.index_count();
    }

    /// Upload this frame's instances.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[InstanceRaw],
    ) {
        let _ = self.instance_buffer.write(device, queue, instances);
        self.instance_count = instances.len() as u32;
    }

    /// Bind buffers and draw every instance with `pipeline`.
    ///
    /// Caller must set bind groups before calling this.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipeline: &wgpu::RenderPipeline,
    ) {
        if self.index_count == 0 || self.instance_buffer.is_empty() {
            return;
        }
        render_pass.set_pipeline(pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
        render_pass
            .set_vertex_buffer(1, self.instance_buffer.buffer().slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(
            0..self.index_count,
            0,
            0..self.instance_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Color;

    #[test]
    fn instance_layout_matches_wgsl() {
        assert_eq!(size_of::<InstanceRaw>(), 96);
        assert_eq!(InstanceRaw::layout().array_stride, 96);
    }

    #[test]
    fn instance_carries_translation_and_colors() {
        let world = Mat4::from_translation(glam::Vec3::new(15.0, 0.0, 0.0));
        let material =
            Material::standard(Color::from_hex(0x00_AAFF), Color::BLACK);
        let raw = InstanceRaw::new(world, &material);
        assert_eq!(raw.model[3], [15.0, 0.0, 0.0, 1.0]);
        assert_eq!(raw.emissive, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(raw.color[0], 0.0);
        assert_eq!(raw.color[3], 1.0);
    }
}
