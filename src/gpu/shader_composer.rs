use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::OrreryError;

/// Top-level shaders that pipelines are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shader {
    /// Point-lit mesh with emissive term.
    MeshStandard,
    /// Unlit flat-colored mesh.
    MeshBasic,
}

impl Shader {
    /// Every top-level shader.
    pub const ALL: [Self; 2] = [Self::MeshStandard, Self::MeshBasic];

    /// WGSL source, possibly containing `#import` directives.
    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            Self::MeshStandard => {
                include_str!("../../assets/shaders/raster/mesh_standard.wgsl")
            }
            Self::MeshBasic => {
                include_str!("../../assets/shaders/raster/mesh_basic.wgsl")
            }
        }
    }

    /// Path used in composer diagnostics.
    #[must_use]
    pub fn file_path(self) -> &'static str {
        match self {
            Self::MeshStandard => "raster/mesh_standard.wgsl",
            Self::MeshBasic => "raster/mesh_basic.wgsl",
        }
    }
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/mesh.wgsl"),
        file_path: "modules/mesh.wgsl",
    },
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders
/// use `#import orrery::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, OrreryError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| shader_error(m.file_path, &e))?;
        }
        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: Shader,
    ) -> Result<wgpu::ShaderModule, OrreryError> {
        let naga_module = self.compose_naga(shader)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shader.file_path()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu shader
    /// module. Useful for testing shader composition without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: Shader,
    ) -> Result<naga::Module, OrreryError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source(),
                file_path: shader.file_path(),
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| shader_error(shader.file_path(), &e))
    }
}

fn shader_error(file_path: &str, error: &ComposerError) -> OrreryError {
    OrreryError::Shader(format!("{file_path}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer
                .compose_naga(shader)
                .unwrap_or_else(|e| panic!("{e}"));
            let entry_points: Vec<_> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(entry_points.contains(&"vs_main"), "{shader:?}");
            assert!(entry_points.contains(&"fs_main"), "{shader:?}");
        }
    }

    /// `@location`s read by `vs_main` through its struct arguments.
    fn vertex_locations(module: &naga::Module) -> Vec<u32> {
        let vs = module
            .entry_points
            .iter()
            .find(|e| e.name == "vs_main")
            .unwrap();
        let mut locations = Vec::new();
        for arg in &vs.function.arguments {
            if let naga::TypeInner::Struct { members, .. } =
                &module.types[arg.ty].inner
            {
                for member in members {
                    if let Some(naga::Binding::Location { location, .. }) =
                        &member.binding
                    {
                        locations.push(*location);
                    }
                }
            }
        }
        locations.sort_unstable();
        locations
    }

    #[test]
    fn vertex_inputs_cover_mesh_and_instance_attributes() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer
                .compose_naga(shader)
                .unwrap_or_else(|e| panic!("{e}"));
            // 0..=1 per vertex, 2..=7 per instance (model columns + colors)
            assert_eq!(
                vertex_locations(&module),
                (0..=7).collect::<Vec<_>>(),
                "{shader:?}"
            );
        }
    }
}
