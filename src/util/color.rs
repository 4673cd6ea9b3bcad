//! Hex color parsing and sRGB → linear conversion.

/// A linear-space RGB color.
///
/// Options store colors as sRGB hex integers (`0xFFA500`), the way web
/// tooling writes them. Shaders and the surface work in linear space, so
/// [`Color::from_hex`] decodes the transfer function once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel, linear.
    pub r: f32,
    /// Green channel, linear.
    pub g: f32,
    /// Blue channel, linear.
    pub b: f32,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    /// Pure white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Decode a `0xRRGGBB` sRGB hex value into linear RGB.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| {
            srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0)
        };
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// `[r, g, b]` for uniform and instance uploads.
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// `[r, g, b, a]` with the given alpha.
    #[must_use]
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Opaque clear color for a render pass.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.r),
            g: f64::from(self.g),
            b: f64::from(self.b),
            a: 1.0,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_are_exact() {
        assert_eq!(Color::from_hex(0xFFFFFF), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn channels_are_extracted_in_rgb_order() {
        let orange = Color::from_hex(0xFFA500);
        assert_eq!(orange.r, 1.0);
        assert_eq!(orange.b, 0.0);
        // 0xA5 = 165 → ~0.376 linear
        assert!((orange.g - 0.376).abs() < 0.002);
    }

    #[test]
    fn dark_background_stays_dark() {
        let bg = Color::from_hex(0x000008);
        assert_eq!(bg.r, 0.0);
        assert!(bg.b > 0.0 && bg.b < 0.01);
    }
}
