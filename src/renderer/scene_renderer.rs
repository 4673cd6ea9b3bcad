//! Draws a [`SolarSystem`]: one instanced pass per [`MeshKind`] into an
//! (optionally multisampled) color target with a depth buffer.

use std::collections::HashMap;

use crate::error::OrreryError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{Shader, ShaderComposer};
use crate::gpu::texture::RenderTarget;
use crate::renderer::draw_context::DrawBindGroups;
use crate::renderer::geometry::MeshData;
use crate::renderer::mesh_pass::{create_mesh_pipeline, InstanceRaw, MeshPass};
use crate::renderer::pipeline_util::DEPTH_FORMAT;
use crate::scene::{Material, MeshKind, SceneGraph, Shading, SolarSystem};
use crate::util::color::Color;

/// Pipeline variant selected by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    shading: Shading,
    double_sided: bool,
}

impl From<&Material> for PipelineKey {
    fn from(material: &Material) -> Self {
        Self {
            shading: material.shading,
            double_sided: material.double_sided,
        }
    }
}

/// Instances of every visible node drawing with `kind`, plus the material
/// of the first one (all nodes of a kind share a material).
#[must_use]
pub fn collect_instances(
    graph: &SceneGraph,
    kind: MeshKind,
) -> (Vec<InstanceRaw>, Option<Material>) {
    let mut material = None;
    let instances = graph
        .mesh_nodes(kind)
        .filter(|&id| graph.is_visible(id))
        .filter_map(|id| {
            let mesh = graph.node(id).mesh?;
            let _ = material.get_or_insert(mesh.material);
            Some(InstanceRaw::new(graph.world_matrix(id), &mesh.material))
        })
        .collect();
    (instances, material)
}

/// Owns pipelines, per-kind mesh passes and attachment textures.
pub struct SceneRenderer {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    passes: Vec<(MeshPass, Option<PipelineKey>)>,
    depth: RenderTarget,
    msaa: Option<RenderTarget>,
    clear_color: Color,
}

impl SceneRenderer {
    /// Build pipelines for every material variant and upload the meshes
    /// of `system`.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        system: &SolarSystem,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, OrreryError> {
        let mut pipelines = HashMap::new();
        for shading in [Shading::Standard, Shading::Basic] {
            for double_sided in [false, true] {
                let shader = match shading {
                    Shading::Standard => Shader::MeshStandard,
                    Shading::Basic => Shader::MeshBasic,
                };
                let label = format!(
                    "{shading:?} Mesh{}",
                    if double_sided { " (double-sided)" } else { "" }
                );
                let pipeline = create_mesh_pipeline(
                    context,
                    &label,
                    shader,
                    (!double_sided).then_some(wgpu::Face::Back),
                    bind_group_layouts,
                    shader_composer,
                )?;
                let _ = pipelines.insert(
                    PipelineKey {
                        shading,
                        double_sided,
                    },
                    pipeline,
                );
            }
        }

        let passes = MeshKind::ALL
            .iter()
            .map(|&kind| {
                let mesh = MeshData::from_shape(system.shape(kind));
                (MeshPass::new(&context.device, kind, &mesh), None)
            })
            .collect();

        let size = (context.width(), context.height());
        let (depth, msaa) = Self::create_targets(context, size);

        Ok(Self {
            pipelines,
            passes,
            depth,
            msaa,
            clear_color: system.background(),
        })
    }

    fn create_targets(
        context: &RenderContext,
        size: (u32, u32),
    ) -> (RenderTarget, Option<RenderTarget>) {
        let depth = RenderTarget::new(
            &context.device,
            "Depth",
            size,
            DEPTH_FORMAT,
            context.sample_count,
        );
        let msaa = (context.sample_count > 1).then(|| {
            RenderTarget::new(
                &context.device,
                "MSAA Color",
                size,
                context.render_format,
                context.sample_count,
            )
        });
        (depth, msaa)
    }

    /// Recreate attachments at the context's current physical size.
    pub fn resize(&mut self, context: &RenderContext) {
        let size = (context.width(), context.height());
        if self.depth.size() != size {
            let (depth, msaa) = Self::create_targets(context, size);
            self.depth = depth;
            self.msaa = msaa;
        }
    }

    /// Regenerate every mesh from `system`'s shapes.
    pub fn rebuild_meshes(
        &mut self,
        context: &RenderContext,
        system: &SolarSystem,
    ) {
        for (pass, _) in &mut self.passes {
            let mesh = MeshData::from_shape(system.shape(pass.kind));
            pass.write_mesh(&context.device, &context.queue, &mesh);
        }
        self.clear_color = system.background();
    }

    /// Upload this frame's instance data.
    pub fn prepare(&mut self, context: &RenderContext, system: &SolarSystem) {
        for (pass, key) in &mut self.passes {
            let (instances, material) =
                collect_instances(system.graph(), pass.kind);
            *key = material.as_ref().map(PipelineKey::from);
            pass.write_instances(&context.device, &context.queue, &instances);
        }
    }

    /// Clear to the background color and draw every pass into
    /// `frame_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
        bind_groups: &DrawBindGroups<'_>,
    ) {
        let (view, resolve_target, store) = match &self.msaa {
            Some(msaa) => {
                (&msaa.view, Some(frame_view), wgpu::StoreOp::Discard)
            }
            None => (frame_view, None, wgpu::StoreOp::Store),
        };

        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_bind_group(0, bind_groups.camera, &[]);
        render_pass.set_bind_group(1, bind_groups.lighting, &[]);
        for (pass, key) in &self.passes {
            if let Some(pipeline) =
                key.as_ref().and_then(|key| self.pipelines.get(key))
            {
                pass.draw(&mut render_pass, pipeline);
            }
        }
    }
}
