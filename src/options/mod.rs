//! Centralized scene, camera, lighting and render options with TOML preset
//! support.
//!
//! Every tweakable constant of the demo (body sizes, colors, spin and orbit
//! speeds, star count, camera projection, control inertia, key bindings)
//! lives here. Options serialize to/from TOML. Colors are saved as
//! `"#RRGGBB"` strings; hand-written files may also use hex literals
//! (`color = 0xFFA500`).

mod camera;
mod controls;
mod hex_color;
mod keybindings;
mod lighting;
mod render;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::{LightFalloff, LightingOptions};
pub use render::RenderOptions;
pub use scene::{
    EarthOptions, OrbitRingOptions, SceneOptions, StarFieldOptions,
    SunOptions,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrreryError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[scene.earth]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and initial placement.
    pub camera: CameraOptions,
    /// Orbit controls behavior.
    pub controls: ControlsOptions,
    /// Scene contents.
    pub scene: SceneOptions,
    /// Point light parameters.
    pub lighting: LightingOptions,
    /// Output resolution and pacing.
    pub render: RenderOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::OptionsParse`] on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, OrreryError> {
        toml::from_str(content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))
    }

    /// Parse options from a JSON string (the browser host's format).
    /// Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::OptionsParse`] on malformed JSON.
    pub fn from_json_str(content: &str) -> Result<Self, OrreryError> {
        serde_json::from_str(content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path).map_err(OrreryError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrreryError::Io)?;
        }
        std::fs::write(path, content).map_err(OrreryError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        assert!(toml_str.contains(r##"color = "#FFA500""##));
        assert!(toml_str.contains(r##"background = "#000008""##));
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scene.earth]
orbit_speed = 1.25
color = 0x336699
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.scene.earth.orbit_speed, 1.25);
        assert_eq!(opts.scene.earth.color, 0x33_6699);
        // Everything else should be default
        assert_eq!(opts.scene.earth.orbit_distance, 15.0);
        assert_eq!(opts.scene.stars.count, 200);
        assert_eq!(opts.camera.fovy, 75.0);
        assert!(opts.controls.enable_damping);
    }

    #[test]
    fn defaults_match_the_demo_scene() {
        let opts = Options::default();
        assert_eq!(opts.scene.sun.radius, 3.0);
        assert_eq!(opts.scene.sun.color, 0xFF_A500);
        assert_eq!(opts.scene.earth.spin_per_frame, 0.02);
        assert_eq!(opts.scene.background, 0x00_0008);
        assert_eq!(opts.camera.position, [0.0, 5.0, 25.0]);
        assert_eq!(opts.controls.damping_factor, 0.05);
        assert_eq!(opts.render.max_pixel_ratio, 2.0);
        assert_eq!(opts.lighting.distance, 500.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[scene\nbroken").unwrap_err();
        assert!(matches!(err, OrreryError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebound_keys_resolve_after_parse() {
        let toml_str = r#"
[keybindings.bindings]
toggle_pause = "KeyP"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyP"),
            Some(KeyAction::TogglePause)
        );
        assert_eq!(opts.keybindings.lookup("Space"), None);
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyO"),
            Some(KeyAction::ToggleOrbitRing)
        );
    }

    #[test]
    fn bundled_preset_parses() {
        let preset = include_str!("../../presets/fast_orbit.toml");
        let opts = Options::from_toml_str(preset).unwrap();
        assert_eq!(opts.scene.stars.count, 400);
        assert!(!opts.scene.orbit_ring.visible);
        assert_eq!(opts.scene.sun, SunOptions::default());
        assert_eq!(opts.render.target_fps, 60);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts = Options::from_json_str(
            r#"{ "scene": { "stars": { "count": 50 } } }"#,
        )
        .unwrap();
        assert_eq!(opts.scene.stars.count, 50);
        assert_eq!(opts.scene.stars.spread, 300.0);
        assert_eq!(opts.camera, CameraOptions::default());
        assert!(Options::from_json_str("{ scene").is_err());
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("orrery-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.scene.stars.seed = Some(7);
        opts.save(&dir.join("seeded.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["seeded".to_owned()]);
        let loaded = Options::load(&dir.join("seeded.toml")).unwrap();
        assert_eq!(loaded.scene.stars.seed, Some(7));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("scene"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("render"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
