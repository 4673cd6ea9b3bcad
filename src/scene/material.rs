//! Mesh kinds and surface materials.

use crate::util::color::Color;

/// Shared geometry a node can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// The sun sphere.
    Sun,
    /// The earth sphere.
    Earth,
    /// A background star sphere (drawn instanced).
    Star,
    /// The flat ring tracing the earth's orbit.
    OrbitRing,
}

impl MeshKind {
    /// Every kind, in draw order.
    pub const ALL: [Self; 4] =
        [Self::Star, Self::OrbitRing, Self::Sun, Self::Earth];
}

/// Lighting model of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Diffuse response to the point light plus emissive.
    Standard,
    /// Flat, unlit color.
    Basic,
}

/// Surface appearance of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Lighting model.
    pub shading: Shading,
    /// Base color (linear).
    pub color: Color,
    /// Self-illumination added after lighting (linear). Ignored by
    /// [`Shading::Basic`].
    pub emissive: Color,
    /// Render back faces too.
    pub double_sided: bool,
}

impl Material {
    /// Lit material with the given base and emissive colors.
    #[must_use]
    pub fn standard(color: Color, emissive: Color) -> Self {
        Self {
            shading: Shading::Standard,
            color,
            emissive,
            double_sided: false,
        }
    }

    /// Unlit flat-colored material.
    #[must_use]
    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            emissive: Color::BLACK,
            double_sided: false,
        }
    }

    /// Same material, rendered from both sides.
    #[must_use]
    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}
