use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit controls sensitivity and inertia.
pub struct ControlsOptions {
    /// Smooth inertia on rotate/pan.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending motion consumed per update.
    #[schemars(
        title = "Damping Factor",
        range(min = 0.01, max = 1.0),
        extend("step" = 0.01)
    )]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(
        title = "Rotate Speed",
        range(min = 0.1, max = 3.0),
        extend("step" = 0.05)
    )]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(
        title = "Pan Speed",
        range(min = 0.1, max = 3.0),
        extend("step" = 0.05)
    )]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(
        title = "Zoom Speed",
        range(min = 0.1, max = 3.0),
        extend("step" = 0.05)
    )]
    pub zoom_speed: f32,
    /// Closest allowed eye-to-target distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed eye-to-target distance.
    #[schemars(skip)]
    pub max_distance: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 500.0,
        }
    }
}
