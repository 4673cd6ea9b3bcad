use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sun", inline)]
#[serde(default)]
/// The central star.
pub struct SunOptions {
    /// Sphere radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Sphere width and height segments.
    #[schemars(skip)]
    pub segments: u32,
    /// Diffuse color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub color: u32,
    /// Self-illumination as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub emissive: u32,
    /// Self-rotation per frame, radians.
    #[schemars(
        title = "Sun Spin",
        range(min = 0.0, max = 0.1),
        extend("step" = 0.001)
    )]
    pub spin_per_frame: f32,
}

impl Default for SunOptions {
    fn default() -> Self {
        Self {
            radius: 3.0,
            segments: 32,
            color: 0xFF_A500,
            emissive: 0xFF_A500,
            spin_per_frame: 0.005,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Earth", inline)]
#[serde(default)]
/// The orbiting planet.
pub struct EarthOptions {
    /// Sphere radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Sphere width and height segments.
    #[schemars(skip)]
    pub segments: u32,
    /// Diffuse color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub color: u32,
    /// Self-illumination as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub emissive: u32,
    /// Self-rotation per frame, radians.
    #[schemars(
        title = "Earth Spin",
        range(min = 0.0, max = 0.2),
        extend("step" = 0.005)
    )]
    pub spin_per_frame: f32,
    /// Distance from the sun's center.
    #[schemars(skip)]
    pub orbit_distance: f32,
    /// Orbital angular speed, radians per second of wall-clock time.
    #[schemars(
        title = "Orbit Speed",
        range(min = 0.0, max = 5.0),
        extend("step" = 0.05)
    )]
    pub orbit_speed: f32,
}

impl Default for EarthOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
            color: 0x00_AAFF,
            emissive: 0x00_0000,
            spin_per_frame: 0.02,
            orbit_distance: 15.0,
            orbit_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Ring", inline)]
#[serde(default)]
/// Flat ring tracing the earth's orbit.
pub struct OrbitRingOptions {
    /// Draw the ring.
    #[schemars(title = "Show Orbit")]
    pub visible: bool,
    /// Half the ring's radial width.
    #[schemars(skip)]
    pub half_width: f32,
    /// Segments around the circle.
    #[schemars(skip)]
    pub segments: u32,
    /// Ring color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub color: u32,
}

impl Default for OrbitRingOptions {
    fn default() -> Self {
        Self {
            visible: true,
            half_width: 0.05,
            segments: 100,
            color: 0x55_5555,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stars", inline)]
#[serde(default)]
/// Decorative background star field.
pub struct StarFieldOptions {
    /// Number of stars.
    #[schemars(skip)]
    pub count: u32,
    /// Edge length of the cube the stars are scattered in, centered on the
    /// origin.
    #[schemars(skip)]
    pub spread: f32,
    /// Star sphere radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Star sphere width and height segments.
    #[schemars(skip)]
    pub segments: u32,
    /// Star color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub color: u32,
    /// Fixed RNG seed for a reproducible field (random when absent).
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self {
            count: 200,
            spread: 300.0,
            radius: 0.25,
            segments: 24,
            color: 0xFF_FFFF,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Contents of the solar system scene.
pub struct SceneOptions {
    /// Clear color as `0xRRGGBB`.
    #[schemars(skip)]
    #[serde(with = "super::hex_color")]
    pub background: u32,
    /// The sun.
    pub sun: SunOptions,
    /// The earth and its orbit.
    pub earth: EarthOptions,
    /// The orbit ring.
    pub orbit_ring: OrbitRingOptions,
    /// The star field.
    pub stars: StarFieldOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            background: 0x00_0008,
            sun: SunOptions::default(),
            earth: EarthOptions::default(),
            orbit_ring: OrbitRingOptions::default(),
            stars: StarFieldOptions::default(),
        }
    }
}
