use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightFalloff;
use crate::scene::PointLight;

/// Point light parameters shared by the lit shaders.
/// NOTE: Must match the WGSL `PointLight` struct layout exactly (48 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    /// World-space light position.
    pub position: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Linear light color.
    pub color: [f32; 3],
    /// Cutoff distance (0 = unbounded).
    pub distance: f32,
    /// Falloff exponent.
    pub decay: f32,
    /// 0 = legacy `(1 - d/cutoff)^decay`, 1 = physical inverse power.
    pub falloff: u32,
    pub(crate) _pad: [f32; 2],
}

impl PointLightUniform {
    /// Uniform for `light` sitting at `position`.
    #[must_use]
    pub fn new(light: &PointLight, position: glam::Vec3) -> Self {
        Self {
            position: position.to_array(),
            intensity: light.intensity,
            color: light.color.to_array(),
            distance: light.distance,
            decay: light.decay,
            falloff: match light.falloff {
                LightFalloff::Legacy => 0,
                LightFalloff::Physical => 1,
            },
            _pad: [0.0; 2],
        }
    }
}

/// GPU-side point light: uniform buffer and its bind group.
pub struct Lighting {
    /// Last uploaded values.
    pub uniform: PointLightUniform,
    /// Uniform buffer bound at group 1, binding 0.
    pub buffer: wgpu::Buffer,
    /// Layout of [`Self::bind_group`].
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing the light to fragment shaders.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Allocate the light uniform with initial values.
    #[must_use]
    pub fn new(context: &RenderContext, uniform: PointLightUniform) -> Self {
        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Point Light Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Point Light Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Point Light Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload `uniform` if it differs from the last upload.
    pub fn update_gpu(
        &mut self,
        queue: &wgpu::Queue,
        uniform: PointLightUniform,
    ) {
        if uniform != self.uniform {
            self.uniform = uniform;
            queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&[self.uniform]),
            );
        }
    }
}
