//! Capture requests and decoding of captured frames.
//!
//! The host captures the visible surface and hands back an encoded image
//! buffer. The buffer is at device-pixel-ratio resolution while any
//! user-drawn region was measured in CSS pixels, so region crops are scaled
//! before cutting.

use image::RgbaImage;
use quickshot_core::geometry::CaptureRegion;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Capture pipeline errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A capture request is already in flight.
    #[error("a capture request is already in flight")]
    Busy,
    /// The host returned an error or no data.
    #[error("capture failed: {0}")]
    Failed(String),
    /// The returned buffer could not be decoded as an image.
    #[error("captured image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    /// The capture region fell outside the captured frame.
    #[error("capture region lies outside the captured frame")]
    EmptyRegion,
    /// The decoded frame has no pixels.
    #[error("captured frame is empty")]
    EmptyFrame,
}

/// What was captured, for filename selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    FullPage,
    SelectedArea,
}

/// A request for the host to capture the visible surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRequest {
    /// Region to crop, in CSS pixels. `None` means the full visible surface.
    pub region: Option<CaptureRegion>,
    /// The host's device pixel ratio at request time.
    pub device_pixel_ratio: f64,
}

impl CaptureRequest {
    /// Request the full visible surface.
    pub fn full_page(device_pixel_ratio: f64) -> Self {
        Self {
            region: None,
            device_pixel_ratio,
        }
    }

    /// Request a user-drawn region.
    pub fn selected_area(region: CaptureRegion, device_pixel_ratio: f64) -> Self {
        Self {
            region: Some(region),
            device_pixel_ratio,
        }
    }

    pub fn kind(&self) -> CaptureKind {
        match self.region {
            Some(_) => CaptureKind::SelectedArea,
            None => CaptureKind::FullPage,
        }
    }

    /// Default filename for saving this capture.
    pub fn suggested_filename(&self) -> &'static str {
        match self.kind() {
            CaptureKind::FullPage => "full_page_screenshot.png",
            CaptureKind::SelectedArea => "selected_area.png",
        }
    }
}

/// Host seam: initiates a capture whose result is delivered back to the
/// controller as a completion.
pub trait CaptureProvider {
    fn request_capture(&mut self, request: &CaptureRequest) -> Result<(), CaptureError>;
}

/// Decode a captured buffer into the session's base bitmap, cropping to the
/// requested region when one was given.
pub fn decode_capture(buffer: &[u8], request: &CaptureRequest) -> Result<Pixmap, CaptureError> {
    let frame = image::load_from_memory(buffer)?.to_rgba8();
    let frame = match &request.region {
        Some(region) => crop_region(&frame, region, request.device_pixel_ratio)?,
        None => frame,
    };
    pixmap_from_rgba(frame)
}

/// Cut the region out of the frame, scaling CSS-pixel coordinates up to the
/// frame's device-pixel resolution and clamping to the frame bounds.
fn crop_region(
    frame: &RgbaImage,
    region: &CaptureRegion,
    device_pixel_ratio: f64,
) -> Result<RgbaImage, CaptureError> {
    let scaled = region.scaled(device_pixel_ratio);
    let x = (scaled.x.max(0.0).round() as u32).min(frame.width());
    let y = (scaled.y.max(0.0).round() as u32).min(frame.height());
    let width = (scaled.width.round() as u32).min(frame.width() - x);
    let height = (scaled.height.round() as u32).min(frame.height() - y);
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyRegion);
    }
    Ok(image::imageops::crop_imm(frame, x, y, width, height).to_image())
}

fn pixmap_from_rgba(frame: RgbaImage) -> Result<Pixmap, CaptureError> {
    let (width, height) = frame.dimensions();
    // Captured frames are opaque, so straight and premultiplied RGBA coincide.
    tiny_skia::IntSize::from_wh(width, height)
        .and_then(|size| Pixmap::from_vec(frame.into_raw(), size))
        .ok_or(CaptureError::EmptyFrame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    /// Encode a small solid-color frame the way the host would deliver it.
    fn encoded_frame(width: u32, height: u32) -> Vec<u8> {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(120, 30, 200, 255));
        quickshot_raster::encode_png(&pixmap).unwrap()
    }

    #[test]
    fn test_suggested_filenames() {
        assert_eq!(
            CaptureRequest::full_page(2.0).suggested_filename(),
            "full_page_screenshot.png"
        );
        let region =
            CaptureRegion::from_corners(Point::new(0.0, 0.0), Point::new(20.0, 20.0)).unwrap();
        assert_eq!(
            CaptureRequest::selected_area(region, 2.0).suggested_filename(),
            "selected_area.png"
        );
    }

    #[test]
    fn test_decode_full_page() {
        let buffer = encoded_frame(40, 20);
        let pixmap = decode_capture(&buffer, &CaptureRequest::full_page(1.0)).unwrap();
        assert_eq!(pixmap.width(), 40);
        assert_eq!(pixmap.height(), 20);
        let px = pixmap.pixel(10, 10).unwrap();
        assert_eq!(px.red(), 120);
        assert_eq!(px.blue(), 200);
    }

    #[test]
    fn test_decode_region_scales_by_dpr() {
        let buffer = encoded_frame(40, 20);
        let region =
            CaptureRegion::from_corners(Point::new(5.0, 2.0), Point::new(15.0, 9.0)).unwrap();
        let pixmap = decode_capture(&buffer, &CaptureRequest::selected_area(region, 2.0)).unwrap();
        // A 10x7 CSS-pixel region at DPR 2 is a 20x14 crop.
        assert_eq!(pixmap.width(), 20);
        assert_eq!(pixmap.height(), 14);
    }

    #[test]
    fn test_decode_region_clamped_to_frame() {
        let buffer = encoded_frame(40, 20);
        let region =
            CaptureRegion::from_corners(Point::new(30.0, 10.0), Point::new(100.0, 100.0)).unwrap();
        let pixmap = decode_capture(&buffer, &CaptureRequest::selected_area(region, 1.0)).unwrap();
        assert_eq!(pixmap.width(), 10);
        assert_eq!(pixmap.height(), 10);
    }

    #[test]
    fn test_region_outside_frame_rejected() {
        let buffer = encoded_frame(40, 20);
        let region =
            CaptureRegion::from_corners(Point::new(50.0, 30.0), Point::new(80.0, 60.0)).unwrap();
        let result = decode_capture(&buffer, &CaptureRequest::selected_area(region, 1.0));
        assert!(matches!(result, Err(CaptureError::EmptyRegion)));
    }

    #[test]
    fn test_garbage_buffer_rejected() {
        let result = decode_capture(b"not an image", &CaptureRequest::full_page(1.0));
        assert!(matches!(result, Err(CaptureError::Decode(_))));
    }
}
