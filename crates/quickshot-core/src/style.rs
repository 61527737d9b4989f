//! Stroke style shared by all drawing tools.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Smallest allowed stroke thickness, in raster pixels.
pub const MIN_THICKNESS: u32 = 1;
/// Largest allowed stroke thickness, in raster pixels.
pub const MAX_THICKNESS: u32 = 24;
/// Thickness applied to a fresh session.
pub const DEFAULT_THICKNESS: u32 = 3;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke color and thickness, read at draw/commit time.
///
/// Session-scoped configuration; never stored per history step independently
/// of the strokes it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke thickness in raster pixels, kept within
    /// [`MIN_THICKNESS`]..=[`MAX_THICKNESS`].
    thickness: u32,
}

impl Style {
    /// Create a style, clamping the thickness to the allowed range.
    pub fn new(color: Rgba, thickness: u32) -> Self {
        Self {
            color,
            thickness: thickness.clamp(MIN_THICKNESS, MAX_THICKNESS),
        }
    }

    /// Get the stroke thickness.
    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Set the stroke thickness, clamped to the allowed range.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    /// Get the stroke color as a peniko [`Color`].
    pub fn stroke(&self) -> Color {
        self.color.into()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Rgba::red(),
            thickness: DEFAULT_THICKNESS,
        }
    }
}
