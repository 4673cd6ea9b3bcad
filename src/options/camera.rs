use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Perspective projection and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(
        title = "Field of View",
        range(min = 20.0, max = 120.0),
        extend("step" = 1.0)
    )]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position (also the reset position).
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Initial orbit target.
    #[schemars(skip)]
    pub target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            position: [0.0, 5.0, 25.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}
