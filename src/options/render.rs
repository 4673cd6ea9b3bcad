use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
/// Output resolution and pacing.
pub struct RenderOptions {
    /// 4x MSAA when the surface format supports it.
    #[schemars(title = "Antialias")]
    pub antialias: bool,
    /// Upper bound on the device pixel ratio used for the drawing buffer.
    #[schemars(
        title = "Max Pixel Ratio",
        range(min = 0.5, max = 4.0),
        extend("step" = 0.25)
    )]
    pub max_pixel_ratio: f64,
    /// Frame cap (0 = follow the host's refresh rate).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            antialias: true,
            max_pixel_ratio: 2.0,
            target_fps: 0,
        }
    }
}
