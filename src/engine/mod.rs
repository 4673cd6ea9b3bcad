//! The rendering engine: GPU resources, frame loop, input and options.

/// The engine's complete interactive vocabulary.
pub mod command;
mod input;
mod options;
/// GPU-free per-frame state.
pub mod state;

pub use command::Command;
use web_time::Instant;

use self::state::FrameState;
use crate::camera::binding::CameraBinding;
use crate::error::OrreryError;
use crate::gpu::lighting::{Lighting, PointLightUniform};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::draw_context::DrawBindGroups;
use crate::renderer::SceneRenderer;
use crate::util::frame_timing::FrameTiming;

/// The solar-system renderer.
///
/// Owns the GPU context, the scene, the camera with its orbit controls,
/// and the forward render pass that draws stars, orbit ring, sun and
/// earth under a single point light.
///
/// # Frame loop
///
/// Call [`frame`](Self::frame) once per animation tick. It updates the
/// controls, advances the scene, uploads uniforms and instances, then
/// renders and presents. Call [`resize`](Self::resize) with the logical
/// size and device pixel ratio whenever the host surface changes.
///
/// # Input
///
/// Forward host events via [`handle_input`](Self::handle_input) and key
/// presses via [`handle_key`](Self::handle_key), or drive the engine
/// directly with [`execute`](Self::execute).
pub struct OrreryEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,

    /// Scene, camera and viewport.
    pub state: FrameState,
    /// Camera uniform buffer and bind group.
    pub camera_binding: CameraBinding,
    /// Point light uniform buffer and bind group.
    pub lighting: Lighting,
    /// Instanced mesh passes and render targets.
    pub(crate) scene_renderer: SceneRenderer,
    /// Converts host events into commands.
    pub(crate) input: InputProcessor,

    /// Runtime options.
    options: Options,
    /// Currently applied options preset name, if any.
    active_preset: Option<String>,
    /// Per-frame timing and FPS tracking.
    pub(crate) frame_timing: FrameTiming,
}

impl OrreryEngine {
    /// Create the GPU context for `window`, populate the scene and build
    /// the render pipelines.
    ///
    /// `size` is the logical size of the drawing surface; the surface is
    /// configured at that size times the capped `device_pixel_ratio`.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError`] if GPU initialization or shader composition
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (f64, f64),
        device_pixel_ratio: f64,
        options: Options,
    ) -> Result<Self, OrreryError> {
        let state =
            FrameState::new(&options, size.0, size.1, device_pixel_ratio);
        let physical = state.viewport.physical_size();
        log::info!(
            "viewport {}x{} @ {}x -> {}x{}",
            state.viewport.width(),
            state.viewport.height(),
            state.viewport.pixel_ratio(),
            physical.0,
            physical.1
        );

        let context =
            RenderContext::new(window, physical, options.render.antialias)
                .await?;
        let mut shader_composer = ShaderComposer::new()?;

        let camera_binding = CameraBinding::new(&context, &state.camera.camera);
        let lighting = Lighting::new(
            &context,
            PointLightUniform::new(
                state.system.light(),
                state.system.light_position(),
            ),
        );

        let scene_renderer = SceneRenderer::new(
            &context,
            &state.system,
            &[&camera_binding.layout, &lighting.layout],
            &mut shader_composer,
        )?;

        let input =
            InputProcessor::with_key_bindings(options.keybindings.clone());
        let frame_timing = FrameTiming::new(options.render.target_fps);

        Ok(Self {
            context,
            state,
            camera_binding,
            lighting,
            scene_renderer,
            input,
            options,
            active_preset: None,
            frame_timing,
        })
    }

    /// One animation tick: update, then render, unless the frame cap says
    /// to wait.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired. Hosts reconfigure on `Lost`/`Outdated` and continue.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }
        self.update();
        self.render()
    }

    /// Step the controls and the scene, then upload the camera uniform (if
    /// the view changed) and this frame's instances.
    pub fn update(&mut self) {
        if self.state.tick(Instant::now()) {
            self.camera_binding
                .update_gpu(&self.context.queue, &self.state.camera.camera);
        }
        self.scene_renderer.prepare(&self.context, &self.state.system);
    }

    /// Draw the scene into the next surface frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.context.render_format),
            ..Default::default()
        });

        let mut encoder = self.context.create_encoder();
        self.scene_renderer.render(
            &mut encoder,
            &view,
            &DrawBindGroups {
                camera: &self.camera_binding.bind_group,
                lighting: &self.lighting.bind_group,
            },
        );
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Adopt a new logical size and device pixel ratio: camera aspect,
    /// surface and depth targets follow. Zero sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) {
        if self.state.resize(width, height, device_pixel_ratio) {
            self.resize_surface();
        }
    }

    /// Reconfigure the surface at its current size (after `Lost` or
    /// `Outdated`).
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    pub(crate) fn resize_surface(&mut self) {
        let (width, height) = self.state.viewport.physical_size();
        self.context.resize(width, height);
        self.scene_renderer.resize(&self.context);
        log::debug!("surface resized to {width}x{height}");
    }
}
