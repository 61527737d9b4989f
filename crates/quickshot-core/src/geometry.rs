//! Coordinate mapping between viewport space and raster space.
//!
//! Pointer events arrive in viewport (CSS pixel) coordinates, while all
//! persisted annotation state lives in the captured bitmap's native pixel
//! space. The mapping depends on where and how large the canvas element is
//! rendered, so it must be re-derived from a fresh [`DisplayRect`] on every
//! event; the rect changes whenever the viewport is resized.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// On-screen bounding rectangle of the rendered canvas element, in viewport
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    /// Create a new display rect.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check whether a viewport point falls inside this rect.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// Map a pointer event position to raster pixel coordinates.
///
/// Linear scaling from the rendered element's rect to the raster's native
/// dimensions. Input inside `display` maps inside the raster; no clamping is
/// applied.
pub fn map_to_raster(
    event: Point,
    display: DisplayRect,
    raster_width: u32,
    raster_height: u32,
) -> Point {
    Point::new(
        (event.x - display.left) * f64::from(raster_width) / display.width,
        (event.y - display.top) * f64::from(raster_height) / display.height,
    )
}

/// A user-drawn capture region in viewport (CSS pixel) coordinates.
///
/// Normalized on construction: origin is the min corner, width/height are
/// absolute. The captured frame is at device-pixel-ratio resolution while the
/// drag happened in CSS pixels, so [`CaptureRegion::scaled`] converts the
/// region into frame space before cropping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CaptureRegion {
    /// Minimum side length in CSS pixels; anything smaller is treated as an
    /// accidental drag and rejected.
    pub const MIN_SIZE: f64 = 6.0;

    /// Build a region from two drag corners, in any order.
    ///
    /// Returns `None` when either side is below [`Self::MIN_SIZE`].
    pub fn from_corners(a: Point, b: Point) -> Option<Self> {
        let width = (b.x - a.x).abs();
        let height = (b.y - a.y).abs();
        if width < Self::MIN_SIZE || height < Self::MIN_SIZE {
            return None;
        }
        Some(Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width,
            height,
        })
    }

    /// Scale the region by a device pixel ratio into frame space.
    pub fn scaled(&self, device_pixel_ratio: f64) -> Self {
        Self {
            x: self.x * device_pixel_ratio,
            y: self.y * device_pixel_ratio,
            width: self.width * device_pixel_ratio,
            height: self.height * device_pixel_ratio,
        }
    }
}
