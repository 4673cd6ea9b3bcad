//! The sun's point light.

use crate::options::{LightFalloff, LightingOptions};
use crate::util::color::Color;

/// Omnidirectional light emitted from a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light color (linear).
    pub color: Color,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Cutoff distance; 0 means unbounded.
    pub distance: f32,
    /// Falloff exponent.
    pub decay: f32,
    /// Falloff model.
    pub falloff: LightFalloff,
}

impl PointLight {
    /// Light described by the lighting options.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            color: Color::from_hex(options.color),
            intensity: options.intensity,
            distance: options.distance,
            decay: options.decay,
            falloff: options.falloff,
        }
    }

    /// Attenuation factor at `light_distance`, mirroring the shader.
    #[must_use]
    pub fn attenuation(&self, light_distance: f32) -> f32 {
        match self.falloff {
            LightFalloff::Legacy => {
                if self.distance > 0.0 && self.decay > 0.0 {
                    (1.0 - light_distance / self.distance)
                        .clamp(0.0, 1.0)
                        .powf(self.decay)
                } else {
                    1.0
                }
            }
            LightFalloff::Physical => {
                let mut attenuation =
                    1.0 / light_distance.powf(self.decay).max(0.01);
                if self.distance > 0.0 {
                    let ratio = light_distance / self.distance;
                    let window = (1.0 - ratio.powi(4)).clamp(0.0, 1.0);
                    attenuation *= window * window;
                }
                attenuation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_falloff_reaches_zero_at_cutoff() {
        let light = PointLight::from_options(&LightingOptions::default());
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!((light.attenuation(15.0) - 0.97).abs() < 1e-6);
        assert_eq!(light.attenuation(500.0), 0.0);
        assert_eq!(light.attenuation(900.0), 0.0);
    }

    #[test]
    fn physical_falloff_is_inverse_square_inside_range() {
        let light = PointLight {
            decay: 2.0,
            distance: 0.0,
            falloff: LightFalloff::Physical,
            ..PointLight::from_options(&LightingOptions::default())
        };
        assert!((light.attenuation(10.0) - 0.01).abs() < 1e-6);
    }
}
