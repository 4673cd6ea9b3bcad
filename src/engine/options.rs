//! Options methods for OrreryEngine

use std::path::Path;

use super::OrreryEngine;
use crate::gpu::lighting::PointLightUniform;
use crate::options::Options;

impl OrreryEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the last loaded or saved preset, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Replace options and apply all changes to subsystems.
    ///
    /// Scene layout changes (sizes, segment counts, star field) rebuild the
    /// scene and regenerate meshes; speeds, visibility, lighting, camera
    /// projection and control tuning are applied in place.
    pub fn set_options(&mut self, new: Options) {
        let old = std::mem::replace(&mut self.options, new);
        let delta = self.state.apply_options(&old, &self.options);

        if delta.rebuilt {
            log::debug!("scene layout changed, rebuilding meshes");
            self.scene_renderer
                .rebuild_meshes(&self.context, &self.state.system);
        }
        if delta.resized {
            self.resize_surface();
        }
        if old.render.antialias != self.options.render.antialias {
            log::warn!("antialias changes take effect on restart");
        }

        self.apply_lighting();
        self.input.set_key_bindings(self.options.keybindings.clone());
        self.frame_timing
            .set_target_fps(self.options.render.target_fps);
    }

    /// Push the scene's point light to the GPU uniform.
    fn apply_lighting(&mut self) {
        let uniform = PointLightUniform::new(
            self.state.system.light(),
            self.state.system.light_position(),
        );
        self.lighting.update_gpu(&self.context.queue, uniform);
    }

    /// Load a named preset from `presets_dir`. Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset. Returns true on
    /// success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save preset '{name}': {e}");
                false
            }
        }
    }
}
