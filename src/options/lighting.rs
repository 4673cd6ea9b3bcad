use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Distance falloff model for the point light.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LightFalloff {
    /// `(1 - d / cutoff)^decay`, no 1/π on the diffuse term.
    #[default]
    Legacy,
    /// `1 / d^decay` with a smooth window at the cutoff distance.
    Physical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// The sun's point light.
pub struct LightingOptions {
    /// Light color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub color: u32,
    /// Light intensity multiplier.
    #[schemars(
        title = "Intensity",
        range(min = 0.0, max = 10.0),
        extend("step" = 0.1)
    )]
    pub intensity: f32,
    /// Cutoff distance (0 = infinite reach).
    #[schemars(
        title = "Distance",
        range(min = 0.0, max = 2000.0),
        extend("step" = 10.0)
    )]
    pub distance: f32,
    /// Falloff exponent.
    #[schemars(
        title = "Decay",
        range(min = 0.0, max = 3.0),
        extend("step" = 0.1)
    )]
    pub decay: f32,
    /// Falloff model.
    #[schemars(title = "Falloff")]
    pub falloff: LightFalloff,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            color: 0xFF_FFFF,
            intensity: 3.0,
            distance: 500.0,
            decay: 1.0,
            falloff: LightFalloff::Legacy,
        }
    }
}
