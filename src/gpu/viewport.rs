//! Logical output size and device pixel ratio.

/// Renderer output size in logical (CSS / window) pixels plus the pixel
/// ratio used to derive the physical framebuffer size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Viewport {
    /// Viewport of `width x height` logical pixels. The device pixel ratio
    /// is capped at `max_pixel_ratio`.
    ///
    /// Logical sizes may be fractional: a 1001 px window at scale 2 is
    /// 500.5 logical pixels wide.
    #[must_use]
    pub fn new(
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let mut viewport = Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: 1.0,
            max_pixel_ratio: sanitize_ratio(max_pixel_ratio),
        };
        viewport.pixel_ratio = viewport.cap(device_pixel_ratio);
        viewport
    }

    /// Adopt a new logical size and device pixel ratio.
    ///
    /// Returns `false` and leaves the viewport untouched when either
    /// dimension is zero (minimized windows, hidden canvases).
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> bool {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixel_ratio = self.cap(device_pixel_ratio);
        true
    }

    /// Change the pixel ratio ceiling. The current ratio is clamped to it
    /// but not raised, since the uncapped device ratio is not retained.
    pub fn set_max_pixel_ratio(&mut self, max_pixel_ratio: f64) {
        self.max_pixel_ratio = sanitize_ratio(max_pixel_ratio);
        self.pixel_ratio = self.pixel_ratio.min(self.max_pixel_ratio);
    }

    /// Logical width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Effective (capped) pixel ratio.
    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Framebuffer size: logical size times pixel ratio, rounded down,
    /// at least one pixel.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (
            to_physical(self.width, self.pixel_ratio),
            to_physical(self.height, self.pixel_ratio),
        )
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    fn cap(&self, device_pixel_ratio: f64) -> f64 {
        sanitize_ratio(device_pixel_ratio).min(self.max_pixel_ratio)
    }
}

/// `logical * ratio` rounded down. Products within float noise of a whole
/// pixel snap to it, so physical → logical → physical is lossless.
fn to_physical(logical: f64, ratio: f64) -> u32 {
    let exact = logical * ratio;
    let nearest = exact.round();
    let pixels = if (exact - nearest).abs() < 1e-6 {
        nearest
    } else {
        exact.floor()
    };
    (pixels as u32).max(1)
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(viewport.physical_size(), (1600, 1200));

        let low = Viewport::new(800.0, 600.0, 1.5, 2.0);
        assert_eq!(low.pixel_ratio(), 1.5);
        assert_eq!(low.physical_size(), (1200, 900));
    }

    #[test]
    fn resize_updates_size_and_aspect() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        assert!(viewport.resize(1920.0, 1080.0, 1.25));
        assert_eq!((viewport.width(), viewport.height()), (1920.0, 1080.0));
        assert!((viewport.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(viewport.physical_size(), (2400, 1350));
    }

    #[test]
    fn zero_sizes_are_ignored() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);
        assert!(!viewport.resize(0.0, 600.0, 1.0));
        assert!(!viewport.resize(800.0, 0.0, 1.0));
        assert_eq!((viewport.width(), viewport.height()), (800.0, 600.0));
    }

    #[test]
    fn bogus_ratios_fall_back_to_one() {
        let viewport = Viewport::new(10.0, 10.0, f64::NAN, 2.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        let mut viewport = Viewport::new(10.0, 10.0, 2.0, 0.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        viewport.set_max_pixel_ratio(2.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }

    #[test]
    fn fractional_physical_sizes_round_down() {
        let viewport = Viewport::new(333.0, 101.0, 1.5, 2.0);
        assert_eq!(viewport.physical_size(), (499, 151));
    }

    #[test]
    fn fractional_logical_sizes_keep_odd_physical_sizes() {
        for (physical, scale) in [(1001_u32, 2.0), (1921, 2.0), (1001, 1.5)] {
            let logical = f64::from(physical) / scale;
            let viewport = Viewport::new(logical, logical, scale, 2.0);
            assert_eq!(viewport.physical_size(), (physical, physical));
        }
    }
}
